use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T, E = RelayError> = std::result::Result<T, E>;

/// Errors that can occur while relaying an alert
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid payload - missing data.item")]
    MissingItem,

    #[error("Chat webhook URL not configured")]
    WebhookUrlNotConfigured,

    #[error("Chat request failed: {0}")]
    ChatRequestFailed(String),

    #[error("Chat service rejected the message with status {status}")]
    ChatRejected { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClientError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_error: Option<String>,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match self {
            RelayError::MissingItem => StatusCode::BAD_REQUEST,
            RelayError::WebhookUrlNotConfigured
            | RelayError::ChatRequestFailed(_)
            | RelayError::ChatRejected { .. }
            | RelayError::HttpClientError(_)
            | RelayError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            RelayError::ChatRequestFailed(detail) => ErrorBody {
                error: "Failed to send notification".into(),
                details: Some(detail),
                chat_error: None,
            },
            RelayError::ChatRejected { status, body } => ErrorBody {
                error: "Failed to send notification".into(),
                details: Some(format!("chat service returned status {status}")),
                chat_error: (!body.is_empty()).then_some(body),
            },
            other => ErrorBody {
                error: other.to_string(),
                details: None,
                chat_error: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RelayError::MissingItem.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::WebhookUrlNotConfigured.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::ChatRejected {
                status: 403,
                body: "forbidden".into()
            }
            .into_response()
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
