use std::sync::Arc;

use crate::config::Config;
use crate::layout::ColumnLayoutEngine;
use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::TextGenerator;
use crate::mailer::MailTransport;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Text generator. Production: `LlmClient`; tests swap in fakes.
    pub llm: Arc<dyn TextGenerator>,
    pub mailer: Arc<dyn MailTransport>,
    /// Attempt budget and backoff for text generation.
    pub retry: RetryPolicy,
    pub layout: ColumnLayoutEngine,
}
