//! # Todo Gen Server
//!
//! Wires the production backends into the HTTP shell:
//!
//! - Redis for todo persistence ([`todo_gen_redis`])
//! - Bedrock Titan Text for suggestions ([`todo_gen_bedrock`])
//! - Axum for serving ([`todo_gen_web`])
//!
//! Everything is built once from an immutable [`Config`] and shared by all
//! requests.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod config;

pub use config::{Config, ConfigError};

use anyhow::Context;
use axum::Router;
use std::sync::Arc;
use todo_gen_bedrock::BedrockClient;
use todo_gen_core::TodoStore;
use todo_gen_core::environment::SystemClock;
use todo_gen_redis::RedisTodoRepository;
use todo_gen_web::{AppState, BasePath, PageSettings, todo_router};
use tokio::signal;
use tracing::{error, info};

/// Bedrock client described by `config`.
#[must_use]
pub fn bedrock_client(config: &Config) -> BedrockClient {
    let mut client = BedrockClient::new(&config.region, config.model_id.clone())
        .with_timeout(config.backend_timeout);

    if let Some(endpoint) = &config.bedrock_endpoint {
        client = client.with_endpoint(endpoint.clone());
    }
    if let Some(api_key) = &config.bedrock_api_key {
        client = client.with_api_key(api_key.clone());
    }

    client
}

/// Connect the backends and build the application router.
///
/// # Errors
///
/// Returns an error if Redis cannot be reached.
pub async fn build_app(config: &Config) -> anyhow::Result<Router> {
    info!(redis_url = %config.redis_url, table = %config.table, "Connecting to Redis...");
    let repository =
        RedisTodoRepository::new(&config.redis_url, config.table.clone(), config.backend_timeout)
            .await
            .context("failed to connect to Redis")?;
    info!("Redis connected");

    let generator = bedrock_client(config);
    info!(
        endpoint = %generator.endpoint(),
        model_id = %generator.model_id(),
        "Bedrock client ready"
    );

    let todos = TodoStore::new(Arc::new(repository), Arc::new(SystemClock));
    let page = PageSettings::new(BasePath::new(&config.path_prefix), config.motd.clone());

    Ok(todo_router(AppState::new(todos, Arc::new(generator), page)))
}

/// Build the application and serve it until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if a backend cannot be set up, the address cannot be
/// bound, or the server fails.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let app = build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(address = %config.bind_addr, prefix = %config.path_prefix, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (on Unix)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;

    fn config(extra: &[(&str, &str)]) -> Config {
        let mut vars = vec![("AWS_REGION", "eu-west-1"), ("TODO_TABLE", "todos")];
        vars.extend_from_slice(extra);
        Config::from_lookup(|var| {
            vars.iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| (*v).to_string())
        })
        .unwrap()
    }

    #[test]
    fn test_bedrock_client_uses_regional_endpoint() {
        let client = bedrock_client(&config(&[]));
        assert_eq!(
            client.endpoint(),
            "https://bedrock-runtime.eu-west-1.amazonaws.com"
        );
        assert_eq!(client.model_id(), "amazon.titan-text-lite-v1");
    }

    #[test]
    fn test_bedrock_client_honours_overrides() {
        let client = bedrock_client(&config(&[
            ("BEDROCK_ENDPOINT", "http://localhost:4566"),
            ("AWS_BEDROCK_MODEL_NAME", "amazon.titan-text-express-v1"),
        ]));
        assert_eq!(client.endpoint(), "http://localhost:4566");
        assert_eq!(client.model_id(), "amazon.titan-text-express-v1");
    }
}
