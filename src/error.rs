use axum::http::StatusCode;
use thiserror::Error;

const GENERIC_SERVER_ERROR: &str = "Server error.";

/// Main error type for the planner
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("API key missing on server.")]
    Config,

    #[error("Missing required fields.")]
    Validation,

    #[error("Invalid request body: {0}")]
    MalformedRequest(String),

    #[error("Provider temporarily unavailable: {}", .message.as_deref().unwrap_or("no details"))]
    TransientProvider { message: Option<String> },

    #[error("Blocked by safety filter.")]
    ContentBlocked,

    #[error("Model returned empty response.")]
    EmptyResponse,

    #[error("Provider error: {}", .0.as_deref().unwrap_or("no details"))]
    Service(Option<String>),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Only provider overload (HTTP 503) is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PlannerError::TransientProvider { .. })
    }

    /// Get the error code for structured logs
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config => "CONFIG_ERROR",
            PlannerError::Validation => "VALIDATION_ERROR",
            PlannerError::MalformedRequest(_) => "MALFORMED_REQUEST",
            PlannerError::TransientProvider { .. } => "PROVIDER_UNAVAILABLE",
            PlannerError::ContentBlocked => "CONTENT_BLOCKED",
            PlannerError::EmptyResponse => "EMPTY_RESPONSE",
            PlannerError::Service(_) => "SERVICE_ERROR",
        }
    }

    /// HTTP status the error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::Validation
            | PlannerError::MalformedRequest(_)
            | PlannerError::ContentBlocked => StatusCode::BAD_REQUEST,
            PlannerError::Config
            | PlannerError::TransientProvider { .. }
            | PlannerError::EmptyResponse
            | PlannerError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Provider failures expose the provider's
    /// own message when it sent one.
    pub fn public_message(&self) -> String {
        match self {
            PlannerError::MalformedRequest(_) => "Invalid request body.".to_string(),
            PlannerError::TransientProvider { message } | PlannerError::Service(message) => {
                message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(GENERIC_SERVER_ERROR)
                    .to_string()
            }
            other => other.to_string(),
        }
    }

    /// Convert to the `{ "error": ... }` wire body
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.public_message() })
    }
}
