//! Error types for web handlers.
//!
//! Every failure becomes a plain-text response: the status and a short
//! human-readable message. There is no JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use todo_gen_core::TodoError;

/// Application error type for web handlers.
///
/// The message is sent to the client verbatim. The optional source is only
/// logged.
///
/// # Examples
///
/// ```ignore
/// async fn handler(State(state): State<AppState>) -> Result<Html<String>, AppError> {
///     let todos = state.todos.list().await
///         .map_err(|e| AppError::from_todo("failed to get todos", e))?;
///     Ok(Html(render(&todos)))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into())
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }

    /// Map a todo operation failure.
    ///
    /// Validation failures become `400` with the validation message alone;
    /// backend failures become `500` with `context` prefixed.
    #[must_use]
    pub fn from_todo(context: &str, err: TodoError) -> Self {
        match err {
            TodoError::Validation(reason) => Self::bad_request(reason.to_string()),
            err => Self::internal(format!("{context}: {err}")).with_source(err.into()),
        }
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    message = %self.message,
                    error = ?source,
                    "Request failed"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    message = %self.message,
                    "Request failed"
                );
            }
        } else {
            tracing::debug!(status = %self.status, message = %self.message, "Request rejected");
        }

        (self.status, self.message).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_gen_core::{Backend, ValidationError};

    #[test]
    fn test_error_display() {
        let err = AppError::bad_request("invalid createdAtEpoch");
        assert_eq!(err.to_string(), "[400] invalid createdAtEpoch");
    }

    #[test]
    fn test_validation_failure_is_bad_request_without_context() {
        let err = AppError::from_todo(
            "failed to add todo",
            ValidationError::TooLong { chars: 300 }.into(),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Todo text must be 200 characters or less.");
    }

    #[test]
    fn test_backend_failure_is_internal_with_context() {
        let err = AppError::from_todo(
            "failed to add todo",
            TodoError::unavailable(Backend::Store, "connection refused"),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.message(),
            "failed to add todo: store unavailable: connection refused"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_response_is_plain_text() {
        let response = AppError::internal("empty response from bedrock").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            response.headers()[axum::http::header::CONTENT_TYPE]
                .to_str()
                .is_ok_and(|ct| ct.starts_with("text/plain"))
        );
    }
}
