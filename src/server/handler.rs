// src/server/handler.rs
use hyper::{Body, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use tower::Service;
use tracing::Instrument;
use uuid::Uuid;

use crate::health::HealthCheck;
use crate::metrics::MetricsCollector;
use crate::process::{current_pid, ProcessInspector};
use crate::server::router::{self, ApiError, Route};

/// Dispatches every request to one of the three routes. Holds no per-request state.
#[derive(Clone)]
pub struct RequestHandler {
    inspector: Arc<dyn ProcessInspector>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl RequestHandler {
    pub fn new(inspector: Arc<dyn ProcessInspector>) -> Self {
        Self {
            inspector,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Method and query string are ignored; the path is percent-decoded before routing.
    pub fn handle(&self, req: &Request<Body>) -> Response<Body> {
        let start = Instant::now();
        let (route_name, result) = match router::decode_path(req.uri().path()) {
            Ok(path) => {
                let route = Route::resolve(&path);
                let result = match route {
                    Route::Health => router::json_response(&HealthCheck::now()),
                    Route::Niceness(slug) => self.niceness(slug),
                };
                (route.name(), result)
            }
            Err(err) => ("invalid_path", Err(err)),
        };

        let response = result.unwrap_or_else(|err| {
            match &err {
                ApiError::Serialization(e) => tracing::error!(%e, "failed to encode response"),
                ApiError::Inspect(e) => tracing::warn!(pid = e.pid(), error = %e, "process lookup failed"),
                other => tracing::warn!(error = %other, "request failed"),
            }
            err.into()
        });

        if let Some(metrics) = &self.metrics {
            metrics.record_request(route_name, response.status().as_u16(), start.elapsed());
        }
        response
    }

    fn niceness(&self, slug: Option<&str>) -> Result<Response<Body>, ApiError> {
        let pid = match slug {
            Some(slug) => router::parse_pid(slug)?,
            None => current_pid(),
        };

        let stat = self.inspector.niceness(pid)?;
        router::json_response(&stat)
    }
}

impl Service<Request<Body>> for RequestHandler {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let handler = self.clone();
        let span = tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %req.method(),
            path = %req.uri().path(),
        );

        Box::pin(
            async move {
                let response = handler.handle(&req);
                tracing::debug!(status = %response.status(), "request completed");
                Ok(response)
            }
            .instrument(span),
        )
    }
}
