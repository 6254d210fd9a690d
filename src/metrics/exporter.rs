// ────────────────────────────────
// src/metrics/exporter.rs
// Optional second listener serving the Prometheus text format.
// ────────────────────────────────
use anyhow::{Context, Result};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, Request, Response, Server, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

use super::MetricsRegistry;

pub const METRICS_PATH: &str = "/metrics";

fn render(registry: &MetricsRegistry, req: &Request<Body>) -> Response<Body> {
    if req.uri().path() != METRICS_PATH {
        let mut response = Response::new(Body::from("Not Found"));
        *response.status_mut() = StatusCode::NOT_FOUND;
        return response;
    }

    match registry.gather() {
        Ok(metrics) => {
            let mut response = Response::new(Body::from(metrics));
            response.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static("text/plain; version=0.0.4"),
            );
            response
        }
        Err(e) => {
            error!(%e, "failed to encode metrics");
            let mut response = Response::new(Body::from(e.to_string()));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

/// Bind the metrics listener and serve it on a background task. Returns the bound address.
pub async fn spawn_metrics_server(
    addr: SocketAddr,
    registry: MetricsRegistry,
) -> Result<SocketAddr> {
    let registry = Arc::new(registry);

    let make_service = hyper::service::make_service_fn(move |_| {
        let registry = registry.clone();

        async move {
            Ok::<_, Infallible>(hyper::service::service_fn(move |req: Request<Body>| {
                let registry = registry.clone();
                async move { Ok::<_, Infallible>(render(&registry, &req)) }
            }))
        }
    });

    let server = Server::try_bind(&addr)
        .with_context(|| format!("Failed to bind metrics listener on {}", addr))?
        .serve(make_service);
    let local_addr = server.local_addr();

    info!("Metrics server listening on http://{}{}", local_addr, METRICS_PATH);

    tokio::spawn(async move {
        if let Err(e) = server.await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(local_addr)
}
