//! Client-side error taxonomy.

use thiserror::Error;

use crate::domain::TaskId;

/// Failures surfaced by the backend gateway.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a usable response (DNS, connect,
    /// timeout, broken body).
    #[error("network error: {0}")]
    Transport(String),

    /// The backend rejected the credentials (HTTP 401). Treated as an
    /// expired or invalid token.
    #[error("authentication failed")]
    Unauthorized,

    /// The backend rejected the request for any other reason.
    #[error("request rejected by the backend (status {status})")]
    Rejected {
        status: u16,
        /// Message extracted from the response body, when one was present.
        message: Option<String>,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message for display. Prefers whatever the backend
    /// said; falls back to the caller's generic message otherwise.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Failures of the local token store.
#[derive(Debug, Clone, Error)]
pub enum TokenStoreError {
    #[error("failed to read stored token: {0}")]
    Read(String),

    #[error("failed to persist token: {0}")]
    Write(String),
}

/// Everything the client surface can report to its caller.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Client-side validation failure. These never reach the network.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] TokenStoreError),

    /// A request for this task is still outstanding; a second one for the
    /// same id is refused rather than queued.
    #[error("task {0} is still being processed")]
    Busy(TaskId),
}

impl ClientError {
    /// Message for display. Validation and busy errors carry their own
    /// wording; gateway errors defer to [`ApiError::display_message`].
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api(api) => api.display_message(fallback),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_wins_over_fallback() {
        let err = ClientError::from(ApiError::Rejected {
            status: 422,
            message: Some("The title field is required.".to_string()),
        });
        assert_eq!(
            err.display_message("Failed to create task. Please try again."),
            "The title field is required."
        );
    }

    #[test]
    fn test_transport_error_uses_fallback() {
        let err = ClientError::from(ApiError::Transport("connection refused".to_string()));
        assert_eq!(
            err.display_message("Failed to delete task. Please try again."),
            "Failed to delete task. Please try again."
        );
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = ClientError::Validation("Task title cannot be empty.".to_string());
        assert_eq!(err.display_message("unused"), "Task title cannot be empty.");
    }
}
