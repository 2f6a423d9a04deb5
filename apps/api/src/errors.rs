use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::layout::LayoutError;
use crate::llm_client::LlmError;
use crate::mailer::MailError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Mail(MailError::InvalidRecipient(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Llm(_) | AppError::Mail(_) => StatusCode::BAD_GATEWAY,
            AppError::Layout(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::Mail(MailError::InvalidRecipient(_)) => {
                "VALIDATION_ERROR"
            }
            AppError::Llm(_) => "LLM_ERROR",
            AppError::Layout(_) => "LAYOUT_ERROR",
            AppError::Mail(MailError::Authentication(_)) => "MAIL_AUTHENTICATION_FAILED",
            AppError::Mail(MailError::Connection(_)) => "MAIL_CONNECTION_FAILED",
            AppError::Mail(MailError::RecipientRejected(_)) => "MAIL_RECIPIENT_REJECTED",
            AppError::Mail(MailError::Rejected(_)) => "MAIL_REJECTED",
            AppError::Mail(MailError::Message(_)) => "MAIL_BUILD_FAILED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Mail(MailError::InvalidRecipient(msg)) => msg.clone(),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                "Failed to generate resume. Please try again later.".to_string()
            }
            AppError::Layout(e) => {
                tracing::error!("Layout error: {e}");
                "Failed to render the resume PDF".to_string()
            }
            AppError::Mail(e) => {
                tracing::error!("Mail error: {e}");
                e.to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_recipient_is_a_client_error() {
        let err = AppError::from(MailError::InvalidRecipient("bad".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_mail_failures_map_to_specific_codes() {
        let cases = [
            (MailError::Authentication(String::new()), "MAIL_AUTHENTICATION_FAILED"),
            (MailError::Connection(String::new()), "MAIL_CONNECTION_FAILED"),
            (MailError::RecipientRejected(String::new()), "MAIL_RECIPIENT_REJECTED"),
            (MailError::Rejected(String::new()), "MAIL_REJECTED"),
            (MailError::Message(String::new()), "MAIL_BUILD_FAILED"),
        ];
        for (mail_error, code) in cases {
            let err = AppError::from(mail_error);
            assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_llm_failure_is_bad_gateway() {
        let err = AppError::from(LlmError::EmptyContent);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
