//! Bedrock runtime client implementation

use crate::error::BedrockError;
use crate::types::{TitanTextRequest, TitanTextResponse};
use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;
use todo_gen_core::{GenerationRequest, Result, TextGenerator};

/// Model used when none is configured
pub const DEFAULT_MODEL_ID: &str = "amazon.titan-text-lite-v1";

/// Bedrock runtime client bound to one model
#[derive(Clone)]
pub struct BedrockClient {
    client: Client,
    endpoint: String,
    model_id: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl BedrockClient {
    /// Create a client for `model_id` on the regional Bedrock runtime endpoint
    #[must_use]
    pub fn new(region: &str, model_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("https://bedrock-runtime.{region}.amazonaws.com"),
            model_id: model_id.into(),
            api_key: None,
            timeout: None,
        }
    }

    /// Builder: Send requests to another endpoint (local stubs, proxies)
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: Authenticate with a Bedrock API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Builder: Bound every call, connect through last body byte
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Model this client invokes
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Endpoint this client talks to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn invoke_url(&self) -> String {
        format!(
            "{}/model/{}/invoke",
            self.endpoint,
            urlencoding::encode(&self.model_id)
        )
    }

    /// Invoke the model with a Titan Text body
    ///
    /// # Errors
    ///
    /// Returns errors for serialization failures, network failures, error
    /// statuses, or undecodable responses
    pub async fn invoke_titan(
        &self,
        request: &TitanTextRequest,
    ) -> std::result::Result<TitanTextResponse, BedrockError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| BedrockError::RequestBuildFailed(e.to_string()))?;

        let mut builder = self
            .client
            .post(self.invoke_url())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body);

        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BedrockError::RequestFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| BedrockError::RequestFailed(e.to_string()))?;
                serde_json::from_slice::<TitanTextResponse>(&bytes)
                    .map_err(|e| BedrockError::ResponseParseFailed(e.to_string()))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(BedrockError::Throttled),
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                Err(BedrockError::Unauthorized {
                    status: status.as_u16(),
                })
            }
            StatusCode::NOT_FOUND => Err(BedrockError::ModelNotFound {
                model_id: self.model_id.clone(),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(BedrockError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

impl fmt::Debug for BedrockClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BedrockClient")
            .field("endpoint", &self.endpoint)
            .field("model_id", &self.model_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl TextGenerator for BedrockClient {
    fn complete(&self, request: GenerationRequest) -> BoxFuture<'_, Result<Vec<String>>> {
        Box::pin(async move {
            let response = self.invoke_titan(&request.into()).await?;

            tracing::debug!(
                model_id = %self.model_id,
                input_tokens = response.input_text_token_count,
                results = response.results.len(),
                "Invoked Bedrock model"
            );

            Ok(response.into_output_texts())
        })
    }
}
