//! Titan Text request and response bodies

use serde::{Deserialize, Serialize};
use todo_gen_core::GenerationRequest;

/// Body of an `InvokeModel` call to a Titan Text model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanTextRequest {
    /// Prompt
    pub input_text: String,
    /// Sampling parameters
    pub text_generation_config: TextGenerationConfig,
}

/// Titan sampling parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationConfig {
    /// Maximum output length in tokens
    pub max_token_count: u32,
    /// Sequences that end generation early (always serialized, even empty)
    pub stop_sequences: Vec<String>,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus-sampling threshold
    pub top_p: f64,
}

impl From<GenerationRequest> for TitanTextRequest {
    fn from(request: GenerationRequest) -> Self {
        Self {
            input_text: request.prompt,
            text_generation_config: TextGenerationConfig {
                max_token_count: request.max_token_count,
                stop_sequences: request.stop_sequences,
                temperature: request.temperature,
                top_p: request.top_p,
            },
        }
    }
}

/// Titan Text response body
///
/// Unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanTextResponse {
    /// Prompt length in tokens
    #[serde(default)]
    pub input_text_token_count: u32,
    /// Candidate completions, best first
    #[serde(default)]
    pub results: Vec<TitanTextResult>,
}

/// One Titan completion
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanTextResult {
    /// Completion length in tokens
    #[serde(default)]
    pub token_count: u32,
    /// Generated text
    pub output_text: String,
    /// Why generation stopped (`FINISH`, `LENGTH`, ...)
    #[serde(default)]
    pub completion_reason: Option<String>,
}

impl TitanTextResponse {
    /// Output texts in the order the model returned them
    #[must_use]
    pub fn into_output_texts(self) -> Vec<String> {
        self.results.into_iter().map(|r| r.output_text).collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let request = TitanTextRequest::from(GenerationRequest::todo_suggestion());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "inputText": "Generate a short, fake to-do list item. It must be a single sentence, not a list.",
                "textGenerationConfig": {
                    "maxTokenCount": 50,
                    "stopSequences": [],
                    "temperature": 0.9,
                    "topP": 1.0
                }
            })
        );
    }

    #[test]
    fn test_response_ignores_unknown_fields() {
        let body = json!({
            "inputTextTokenCount": 17,
            "results": [{
                "tokenCount": 6,
                "outputText": " Buy milk.",
                "completionReason": "FINISH",
                "extra": true
            }],
            "amazon-bedrock-invocationMetrics": {}
        });

        let response: TitanTextResponse = serde_json::from_value(body).unwrap();

        assert_eq!(response.input_text_token_count, 17);
        assert_eq!(response.into_output_texts(), vec![" Buy milk.".to_string()]);
    }

    #[test]
    fn test_response_without_results_is_empty() {
        let response: TitanTextResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }
}
