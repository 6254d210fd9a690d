// src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use niceness_api::{
    config,
    metrics::{spawn_metrics_server, MetricsRegistry},
    process::SystemInspector,
    server::{RequestHandler, ServerBuilder},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("niceness_api=info".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    let config = config::load_config()?;

    let metrics_registry = MetricsRegistry::new()?;
    let handler =
        RequestHandler::new(Arc::new(SystemInspector)).with_metrics(metrics_registry.collector());

    if let Some(metrics_addr) = config.metrics_addr() {
        spawn_metrics_server(metrics_addr, metrics_registry).await?;
    }

    info!("Starting server on port {}", config.port);

    // Runs until the process is terminated externally; bind failure is fatal.
    ServerBuilder::new(config.bind_addr())
        .with_handler(handler)
        .serve()
        .await
}
