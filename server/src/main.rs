//! todo-gen HTTP server.
//!
//! A small web todo list backed by Redis, with model-generated suggestions
//! from Amazon Bedrock.

use todo_gen_server::Config;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_gen=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;

    info!(
        address = %config.bind_addr,
        model_id = %config.model_id,
        table = %config.table,
        "Starting todo-gen server"
    );
    if let Some(motd) = &config.motd {
        info!(motd = %motd, "Message of the day");
    }

    todo_gen_server::serve(config).await
}
