//! Error types for todo operations.

use std::fmt;
use thiserror::Error;

/// Result type alias for todo operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Reasons a candidate todo text is rejected.
///
/// The display strings are user-facing: they are returned verbatim in the
/// body of a `400 Bad Request`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No text was supplied.
    #[error("Todo text must not be empty.")]
    Empty,

    /// More than [`MAX_TODO_CHARS`](crate::MAX_TODO_CHARS) Unicode scalar values.
    #[error("Todo text must be 200 characters or less.")]
    TooLong {
        /// Number of scalar values in the rejected text
        chars: usize,
    },

    /// At least one scalar value is outside the printable categories.
    #[error("Todo text contains non-printable characters.")]
    NonPrintable {
        /// First offending character
        ch: char,
    },
}

/// The remote collaborator an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Key-value store holding the todos.
    Store,
    /// Text-generation service producing suggestions.
    Generator,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store => f.write_str("store"),
            Self::Generator => f.write_str("generator"),
        }
    }
}

/// Closed error taxonomy for every todo operation.
///
/// Callers branch on the variant, never on the message text. Only
/// [`TodoError::Validation`] is caused by the client; everything else is a
/// backend failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    // ═══════════════════════════════════════════════════════════
    // Client Errors
    // ═══════════════════════════════════════════════════════════

    /// Todo text failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ═══════════════════════════════════════════════════════════
    // Backend Errors
    // ═══════════════════════════════════════════════════════════

    /// The backend does not know the addressed resource.
    #[error("{backend}: {what} not found")]
    NotFound {
        /// Backend that reported the miss
        backend: Backend,
        /// What was looked up
        what: String,
    },

    /// The request to the backend could not be built.
    #[error("{backend}: could not build request: {message}")]
    InvalidRequest {
        /// Backend the request was meant for
        backend: Backend,
        /// Underlying cause
        message: String,
    },

    /// The backend could not be reached or refused to serve the request
    /// (network, timeout, throttling, authorization).
    #[error("{backend} unavailable: {message}")]
    Unavailable {
        /// Unreachable backend
        backend: Backend,
        /// Underlying cause
        message: String,
    },

    /// The backend answered with something that could not be decoded.
    #[error("{backend} returned a malformed response: {message}")]
    BadResponse {
        /// Backend that answered
        backend: Backend,
        /// Decoding failure
        message: String,
    },

    /// The backend answered successfully but with nothing usable.
    #[error("empty response from {backend}")]
    EmptyResponse {
        /// Backend that answered
        backend: Backend,
    },

    /// The backend produced text that does not pass validation.
    #[error("{backend} produced unusable text: {reason}")]
    UnusableOutput {
        /// Backend that produced the text
        backend: Backend,
        /// Validation failure
        reason: ValidationError,
    },
}

impl TodoError {
    /// Build a [`TodoError::Unavailable`].
    #[must_use]
    pub fn unavailable(backend: Backend, message: impl Into<String>) -> Self {
        Self::Unavailable {
            backend,
            message: message.into(),
        }
    }

    /// Build a [`TodoError::BadResponse`].
    #[must_use]
    pub fn bad_response(backend: Backend, message: impl Into<String>) -> Self {
        Self::BadResponse {
            backend,
            message: message.into(),
        }
    }

    /// Returns `true` if this error is due to invalid client input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use todo_gen_core::{Backend, TodoError, ValidationError};
    /// assert!(TodoError::from(ValidationError::Empty).is_client_error());
    /// assert!(!TodoError::unavailable(Backend::Store, "timeout").is_client_error());
    /// ```
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The backend this error came from, if any.
    #[must_use]
    pub const fn backend(&self) -> Option<Backend> {
        match self {
            Self::Validation(_) => None,
            Self::NotFound { backend, .. }
            | Self::InvalidRequest { backend, .. }
            | Self::Unavailable { backend, .. }
            | Self::BadResponse { backend, .. }
            | Self::EmptyResponse { backend }
            | Self::UnusableOutput { backend, .. } => Some(*backend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::TooLong { chars: 201 }.to_string(),
            "Todo text must be 200 characters or less."
        );
        assert_eq!(
            ValidationError::NonPrintable { ch: '\u{7}' }.to_string(),
            "Todo text contains non-printable characters."
        );
    }

    #[test]
    fn test_validation_is_transparent() {
        let err = TodoError::from(ValidationError::Empty);
        assert_eq!(err.to_string(), "Todo text must not be empty.");
        assert_eq!(err.backend(), None);
    }

    #[test]
    fn test_backend_errors_name_their_backend() {
        let err = TodoError::EmptyResponse {
            backend: Backend::Generator,
        };
        assert_eq!(err.to_string(), "empty response from generator");
        assert_eq!(err.backend(), Some(Backend::Generator));
        assert!(!err.is_client_error());

        let err = TodoError::unavailable(Backend::Store, "connection refused");
        assert_eq!(err.to_string(), "store unavailable: connection refused");
    }
}
