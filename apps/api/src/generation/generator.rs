//! Resume Generation: orchestrates one submission end to end.
//!
//! Flow: validate → compose prompt → text generation (with retry) →
//! sanitize → parse sections. PDF rendering is a separate step so a client
//! can edit the text before laying it out.
//!
//! All LLM calls go through `TextGenerator`; no direct HTTP here.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::prompts::compose_prompt;
use crate::layout::ColumnLayoutEngine;
use crate::llm_client::retry::{with_retry, RetryPolicy};
use crate::llm_client::TextGenerator;
use crate::resume::{parse_sections, sanitize, ContactBlock, ResumeSections};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub instructions: String,
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResume {
    pub submission_id: Uuid,
    /// Generated text, folded to ASCII.
    pub resume_text: String,
    pub sections: ResumeSections,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one generation submission.
///
/// An empty job description is rejected before any call is made. The
/// generator is retried per `policy`; once attempts are exhausted the last
/// error is returned and no partial resume is produced.
pub async fn generate_resume(
    llm: &dyn TextGenerator,
    policy: &RetryPolicy,
    request: GenerateRequest,
) -> Result<GeneratedResume, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter the Job Description (JD) before generating the resume.".to_string(),
        ));
    }

    let submission_id = Uuid::new_v4();
    let prompt = compose_prompt(
        &request.contact_info,
        &request.instructions,
        &request.job_description,
    );
    info!(%submission_id, prompt_chars = prompt.len(), "Generating resume");

    let raw = with_retry(policy, |attempt| {
        let prompt = prompt.as_str();
        async move {
            if attempt > 1 {
                info!(%submission_id, attempt, "Retrying resume generation");
            }
            llm.generate(prompt).await
        }
    })
    .await
    .map_err(|e| {
        warn!(%submission_id, error = %e, "Resume generation failed");
        AppError::from(e)
    })?;

    let resume_text = sanitize(&raw);
    let sections = parse_sections(&resume_text);
    if sections.is_empty() {
        warn!(%submission_id, "Generated text has no recognizable section headers");
    }
    info!(
        %submission_id,
        sections = sections.len(),
        "Resume generated"
    );

    Ok(GeneratedResume {
        submission_id,
        resume_text,
        sections,
    })
}

/// Sanitizes, parses and lays out `resume_text` as PDF bytes.
///
/// Layout is CPU-bound, so it runs on the blocking pool.
pub async fn render_resume_pdf(
    engine: &ColumnLayoutEngine,
    resume_text: &str,
    submitted_contact: Option<&str>,
) -> Result<Vec<u8>, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let engine = engine.clone();
    let text = sanitize(resume_text);
    let submitted_contact = submitted_contact.map(str::to_string);

    let bytes = tokio::task::spawn_blocking(move || {
        let sections = parse_sections(&text);
        let contact = ContactBlock::resolve(&sections, submitted_contact.as_deref());
        engine.render(&sections, &contact)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("layout task failed: {e}")))??;

    info!(bytes = bytes.len(), "Resume PDF rendered");
    Ok(bytes)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays canned results in order and records the prompts it saw.
    struct ScriptedGenerator {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(mut replies: Vec<Result<String, LlmError>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    const RESUME: &str = "CONTACT INFORMATION\nJane Doe\njane@example.com | 555-0100\n\nEDUCATION\nState University \u{2014} BSc\n\nEXPERIENCE\n\u{2022} Built a parser";

    fn request(job: &str) -> GenerateRequest {
        GenerateRequest {
            contact_info: "Jane Doe\njane@example.com | 555-0100".to_string(),
            instructions: String::new(),
            job_description: job.to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_job_description_makes_no_call() {
        let llm = ScriptedGenerator::new(vec![Ok(RESUME.to_string())]);
        let result = generate_resume(&llm, &RetryPolicy::default(), request("  \n")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_generated_text_is_sanitized_and_parsed() {
        let llm = ScriptedGenerator::new(vec![Ok(RESUME.to_string())]);
        let resume = generate_resume(&llm, &RetryPolicy::default(), request("Rust engineer"))
            .await
            .unwrap();

        assert!(resume.resume_text.is_ascii());
        assert!(resume.resume_text.contains("State University - BSc"));
        assert_eq!(
            resume.sections.names().collect::<Vec<_>>(),
            vec!["CONTACT INFORMATION", "EDUCATION", "EXPERIENCE"]
        );
        assert_eq!(
            resume.sections.get("experience").unwrap(),
            &["* Built a parser".to_string()]
        );
        assert!(llm.prompts.lock().unwrap()[0].contains("Job Description:\nRust engineer"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_retried() {
        let llm = ScriptedGenerator::new(vec![
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            }),
            Err(LlmError::EmptyContent),
            Ok(RESUME.to_string()),
        ]);
        let resume = generate_resume(&llm, &RetryPolicy::default(), request("Rust engineer"))
            .await
            .unwrap();
        assert_eq!(llm.calls(), 3);
        assert!(resume.sections.contains("EDUCATION"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_attempts_return_llm_error() {
        let llm = ScriptedGenerator::new(vec![
            Err(LlmError::EmptyContent),
            Err(LlmError::EmptyContent),
            Err(LlmError::EmptyContent),
        ]);
        let result = generate_resume(&llm, &RetryPolicy::default(), request("Rust engineer")).await;
        assert!(matches!(result, Err(AppError::Llm(LlmError::EmptyContent))));
        assert_eq!(llm.calls(), 3);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let llm = ScriptedGenerator::new(vec![Err(LlmError::Api {
            status: 400,
            message: "API key not valid".to_string(),
        })]);
        let result = generate_resume(&llm, &RetryPolicy::default(), request("Rust engineer")).await;
        assert!(matches!(result, Err(AppError::Llm(LlmError::Api { status: 400, .. }))));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_render_resume_pdf() {
        let bytes = render_resume_pdf(&ColumnLayoutEngine::default(), RESUME, None)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_render_rejects_empty_text() {
        let result = render_resume_pdf(&ColumnLayoutEngine::default(), " ", None).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
