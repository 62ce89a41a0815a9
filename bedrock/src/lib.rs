//! # Bedrock Titan Text Client
//!
//! Minimal Amazon Bedrock runtime client that invokes Titan Text models and
//! implements [`TextGenerator`](todo_gen_core::TextGenerator) for todo
//! suggestions.
//!
//! Requests are authenticated with a Bedrock API key sent as a bearer token,
//! or sent unauthenticated to a custom endpoint (local stubs, signing
//! proxies).
//!
//! ## Example
//!
//! ```no_run
//! use todo_gen_bedrock::{BedrockClient, DEFAULT_MODEL_ID};
//! use todo_gen_core::suggest_todo;
//!
//! # async fn example() -> todo_gen_core::Result<()> {
//! let client = BedrockClient::new("us-east-1", DEFAULT_MODEL_ID).with_api_key("bedrock-api-key");
//! let text = suggest_todo(&client).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod client;
pub mod error;
pub mod types;

pub use client::{BedrockClient, DEFAULT_MODEL_ID};
pub use error::BedrockError;
pub use types::{TextGenerationConfig, TitanTextRequest, TitanTextResponse, TitanTextResult};
