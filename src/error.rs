//! Errors produced on the token exchange path and their HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// `Origin` header not on the allow-list.
    #[error("origin not allowed")]
    OriginDenied,

    #[error("missing code parameter")]
    MissingCode,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// No usable response from the token endpoint.
    #[error("failed to exchange code for token: {0}")]
    Transport(String),

    #[error("token endpoint returned HTTP {status}")]
    UpstreamStatus { status: StatusCode, body: String },

    /// Success status, but the payload carries an `error` field.
    #[error("token endpoint rejected the exchange")]
    UpstreamRejected(Value),
}

impl RelayError {
    /// Outcome class used in logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::OriginDenied => "rejected-by-origin",
            RelayError::MissingCode => "rejected-missing-code",
            RelayError::InvalidBody(_) => "rejected-invalid-body",
            RelayError::Transport(_) => "upstream-transport-error",
            RelayError::UpstreamStatus { .. } => "upstream-status-error",
            RelayError::UpstreamRejected(_) => "upstream-payload-error",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            RelayError::OriginDenied => (
                StatusCode::FORBIDDEN,
                json!({ "error": "Not allowed by CORS" }),
            ),
            RelayError::MissingCode => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing code parameter" }),
            ),
            RelayError::InvalidBody(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request body", "details": details }),
            ),
            RelayError::Transport(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to exchange code for token", "details": details }),
            ),
            RelayError::UpstreamStatus { status, body } => (
                status,
                json!({ "error": "GitHub API error", "status": status.as_u16(), "details": body }),
            ),
            RelayError::UpstreamRejected(payload) => (StatusCode::BAD_REQUEST, payload),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: RelayError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn upstream_status_keeps_status_and_raw_body() {
        let (status, body) = render(RelayError::UpstreamStatus {
            status: StatusCode::UNAUTHORIZED,
            body: r#"{"error":"bad_verification_code"}"#.to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            json!({
                "error": "GitHub API error",
                "status": 401,
                "details": "{\"error\":\"bad_verification_code\"}"
            })
        );
    }

    #[tokio::test]
    async fn rejected_payload_passes_through() {
        let payload = json!({ "error": "incorrect_client_credentials", "error_uri": "https://docs" });
        let (status, body) = render(RelayError::UpstreamRejected(payload.clone())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn origin_denial_is_generic() {
        let (status, body) = render(RelayError::OriginDenied).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "error": "Not allowed by CORS" }));
    }

    #[test]
    fn outcome_classes_are_distinct() {
        let outcomes = [
            RelayError::OriginDenied.outcome(),
            RelayError::MissingCode.outcome(),
            RelayError::InvalidBody(String::new()).outcome(),
            RelayError::Transport(String::new()).outcome(),
            RelayError::UpstreamStatus {
                status: StatusCode::BAD_GATEWAY,
                body: String::new(),
            }
            .outcome(),
            RelayError::UpstreamRejected(Value::Null).outcome(),
        ];
        let unique: std::collections::HashSet<_> = outcomes.iter().collect();
        assert_eq!(unique.len(), outcomes.len());
    }
}
