//! Axum route handlers for the Resume API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{generate_resume, render_resume_pdf, GenerateRequest, GeneratedResume};
use crate::mailer::{self, ATTACHMENT_FILENAME};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    pub resume_text: String,
    /// Contact text used when the resume has no `CONTACT INFORMATION` section.
    pub contact_info: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub recipient: String,
    pub resume_text: String,
    pub contact_info: Option<String>,
    #[serde(default = "default_attach_pdf")]
    pub attach_pdf: bool,
}

fn default_attach_pdf() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub sent: bool,
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Composes the prompt, calls the text generator and returns the sanitized
/// resume text with its parsed sections.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedResume>, AppError> {
    let resume = generate_resume(state.llm.as_ref(), &state.retry, request).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resumes/pdf
///
/// Lays out resume text as a two-column PDF download.
pub async fn handle_pdf(
    State(state): State<AppState>,
    Json(request): Json<PdfRequest>,
) -> Result<Response, AppError> {
    let bytes = render_resume_pdf(
        &state.layout,
        &request.resume_text,
        request.contact_info.as_deref(),
    )
    .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{ATTACHMENT_FILENAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/resumes/email
///
/// Sends the resume text to `recipient`, with the PDF attached unless
/// `attach_pdf` is false. The recipient is checked before any layout work.
pub async fn handle_email(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    let recipient = mailer::validate_recipient(&request.recipient)?;
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let attachment = if request.attach_pdf {
        Some(
            render_resume_pdf(
                &state.layout,
                &request.resume_text,
                request.contact_info.as_deref(),
            )
            .await?,
        )
    } else {
        None
    };

    let receipt = mailer::deliver(
        state.mailer.as_ref(),
        recipient,
        request.resume_text,
        attachment,
    )
    .await?;

    Ok(Json(EmailResponse {
        sent: true,
        message: receipt.message,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::layout::ColumnLayoutEngine;
    use crate::llm_client::retry::RetryPolicy;
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::mailer::{MailError, MailReceipt, MailTransport, OutgoingMail};
    use crate::routes::build_router;
    use crate::state::AppState;

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutgoingMail>>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, mail: OutgoingMail) -> Result<MailReceipt, MailError> {
            self.sent.lock().unwrap().push(mail);
            Ok(MailReceipt {
                message: "Email sent successfully!".to_string(),
            })
        }
    }

    const RESUME: &str = "CONTACT INFORMATION\nJane Doe\njane@example.com | 555-0100\n\nEDUCATION\nState University\n\nEXPERIENCE\n- Built a parser";

    fn test_config() -> Config {
        Config::from_lookup(|key| match key {
            "GENAI_API_KEY" => Some("key".to_string()),
            "SENDER_EMAIL" => Some("sender@example.com".to_string()),
            "SENDER_PASSWORD" => Some("secret".to_string()),
            _ => None,
        })
        .unwrap()
    }

    fn app(transport: Arc<RecordingTransport>) -> axum::Router {
        build_router(AppState {
            config: Arc::new(test_config()),
            llm: Arc::new(FixedGenerator(RESUME)),
            mailer: transport,
            retry: RetryPolicy::default(),
            layout: ColumnLayoutEngine::default(),
        })
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-api");
        assert_eq!(body["model"], "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn test_generate_returns_text_and_sections() {
        let response = app(Arc::default())
            .oneshot(post(
                "/api/v1/resumes/generate",
                json!({"contact_info": "Jane Doe", "job_description": "Rust engineer"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert!(body["submission_id"].is_string());
        assert_eq!(body["sections"]["EDUCATION"], json!(["State University"]));
        assert_eq!(body["sections"]["EXPERIENCE"], json!(["- Built a parser"]));
        assert_eq!(body["resume_text"], RESUME);
    }

    #[tokio::test]
    async fn test_generate_requires_job_description() {
        let response = app(Arc::default())
            .oneshot(post(
                "/api/v1/resumes/generate",
                json!({"contact_info": "Jane Doe", "job_description": ""}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_pdf_download() {
        let response = app(Arc::default())
            .oneshot(post("/api/v1/resumes/pdf", json!({"resume_text": RESUME})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/pdf");
        assert_eq!(
            response.headers()["content-disposition"],
            "attachment; filename=\"resume.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_email_with_invalid_recipient_never_sends() {
        let transport = Arc::new(RecordingTransport::default());
        let response = app(transport.clone())
            .oneshot(post(
                "/api/v1/resumes/email",
                json!({"recipient": "not-an-address", "resume_text": RESUME}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_email_attaches_pdf_by_default() {
        let transport = Arc::new(RecordingTransport::default());
        let response = app(transport.clone())
            .oneshot(post(
                "/api/v1/resumes/email",
                json!({"recipient": "jane@example.com", "resume_text": RESUME}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["sent"], json!(true));

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, RESUME);
        assert!(sent[0].attachment.as_ref().unwrap().starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_email_without_attachment() {
        let transport = Arc::new(RecordingTransport::default());
        let response = app(transport.clone())
            .oneshot(post(
                "/api/v1/resumes/email",
                json!({"recipient": "jane@example.com", "resume_text": RESUME, "attach_pdf": false}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(transport.sent.lock().unwrap()[0].attachment.is_none());
    }
}
