//! Error types for the Bedrock client

use thiserror::Error;
use todo_gen_core::{Backend, TodoError};

/// Errors that can occur when invoking a Bedrock model
#[derive(Debug, Error)]
pub enum BedrockError {
    /// The request body could not be serialized
    #[error("Request serialization failed: {0}")]
    RequestBuildFailed(String),

    /// HTTP request failed (connection, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Throttled - too many requests
    #[error("Throttled - too many requests")]
    Throttled,

    /// Missing, invalid or insufficient credentials
    #[error("Unauthorized (status {status})")]
    Unauthorized {
        /// 401 or 403
        status: u16,
    },

    /// The configured model id does not exist in the region
    #[error("Model {model_id} not found")]
    ModelNotFound {
        /// Model id that was requested
        model_id: String,
    },

    /// Bedrock returned any other error status
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
}

impl From<BedrockError> for TodoError {
    fn from(err: BedrockError) -> Self {
        match err {
            BedrockError::RequestBuildFailed(message) => Self::InvalidRequest {
                backend: Backend::Generator,
                message,
            },
            BedrockError::ResponseParseFailed(message) => {
                Self::bad_response(Backend::Generator, message)
            }
            BedrockError::ModelNotFound { model_id } => Self::NotFound {
                backend: Backend::Generator,
                what: format!("model {model_id}"),
            },
            other @ (BedrockError::RequestFailed(_)
            | BedrockError::Throttled
            | BedrockError::Unauthorized { .. }
            | BedrockError::ApiError { .. }) => {
                Self::unavailable(Backend::Generator, other.to_string())
            }
        }
    }
}
