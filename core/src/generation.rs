//! Todo suggestions from a text-generation model.
//!
//! Every suggestion uses the same fixed request: one instruction prompt,
//! short output, high temperature, no nucleus truncation and no stop
//! sequences. The first returned candidate is cleaned up and checked with the
//! same rule as user input before it is handed back.

use crate::error::{Backend, Result, TodoError};
use crate::validation::validate_todo_text;
use futures::future::BoxFuture;

/// Instruction sent to the model for every suggestion.
pub const TODO_PROMPT: &str =
    "Generate a short, fake to-do list item. It must be a single sentence, not a list.";

/// Maximum number of tokens the model may produce.
pub const MAX_TOKEN_COUNT: u32 = 50;

/// Sampling temperature.
pub const TEMPERATURE: f64 = 0.9;

/// Nucleus-sampling threshold (1.0 disables truncation).
pub const TOP_P: f64 = 1.0;

/// Backend-neutral text-generation request.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    /// Instruction prompt
    pub prompt: String,
    /// Maximum output length in tokens
    pub max_token_count: u32,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus-sampling threshold
    pub top_p: f64,
    /// Sequences that end generation early
    pub stop_sequences: Vec<String>,
}

impl GenerationRequest {
    /// The fixed request used to suggest a todo.
    #[must_use]
    pub fn todo_suggestion() -> Self {
        Self {
            prompt: TODO_PROMPT.to_string(),
            max_token_count: MAX_TOKEN_COUNT,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            stop_sequences: Vec::new(),
        }
    }
}

/// Remote text-generation service.
pub trait TextGenerator: Send + Sync {
    /// Run one generation request and return the candidate completions in the
    /// order the service produced them.
    ///
    /// # Errors
    ///
    /// Returns a generator error if the request cannot be built, the service
    /// cannot be reached, or its answer cannot be decoded.
    fn complete(&self, request: GenerationRequest) -> BoxFuture<'_, Result<Vec<String>>>;
}

/// Strip surrounding whitespace, then one layer of double quotes.
///
/// # Examples
///
/// ```
/// use todo_gen_core::generation::clean_generated_text;
///
/// assert_eq!(clean_generated_text("  \"Buy milk.\"  "), "Buy milk.");
/// assert_eq!(clean_generated_text("\"\"nested\"\""), "\"nested\"");
/// ```
#[must_use]
pub fn clean_generated_text(raw: &str) -> &str {
    let text = raw.trim();
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}

/// Ask the generator for one todo suggestion.
///
/// # Errors
///
/// - Any error from [`TextGenerator::complete`]
/// - [`TodoError::EmptyResponse`] if no candidate was returned
/// - [`TodoError::UnusableOutput`] if the cleaned text fails validation
pub async fn suggest_todo(generator: &dyn TextGenerator) -> Result<String> {
    let candidates = generator
        .complete(GenerationRequest::todo_suggestion())
        .await?;

    let first = candidates
        .into_iter()
        .next()
        .ok_or(TodoError::EmptyResponse {
            backend: Backend::Generator,
        })?;

    let text = clean_generated_text(&first).to_string();

    validate_todo_text(&text).map_err(|reason| {
        tracing::warn!(%reason, "Generated todo rejected");
        TodoError::UnusableOutput {
            backend: Backend::Generator,
            reason,
        }
    })?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_suggestion_request_is_fixed() {
        let request = GenerationRequest::todo_suggestion();
        assert_eq!(request.prompt, TODO_PROMPT);
        assert_eq!(request.max_token_count, 50);
        assert!((request.temperature - 0.9).abs() < f64::EPSILON);
        assert!((request.top_p - 1.0).abs() < f64::EPSILON);
        assert!(request.stop_sequences.is_empty());
    }

    #[test]
    fn test_clean_strips_whitespace_then_quotes() {
        assert_eq!(clean_generated_text("  \"Buy milk.\"  "), "Buy milk.");
        assert_eq!(clean_generated_text("\n\nWalk the dog\n"), "Walk the dog");
    }

    #[test]
    fn test_clean_strips_only_one_layer() {
        assert_eq!(clean_generated_text("\"\"Call mom\"\""), "\"Call mom\"");
    }

    #[test]
    fn test_clean_handles_unbalanced_quotes() {
        assert_eq!(clean_generated_text("\"Call mom"), "Call mom");
        assert_eq!(clean_generated_text("Call mom\""), "Call mom");
        assert_eq!(clean_generated_text("\""), "");
    }

    #[test]
    fn test_clean_keeps_inner_whitespace_inside_quotes() {
        assert_eq!(clean_generated_text("\" Call mom \""), " Call mom ");
    }
}
