// src/metrics/mod.rs
mod collector;
mod exporter;

pub use collector::{MetricsCollector, MetricsRegistry};
pub use exporter::{spawn_metrics_server, METRICS_PATH};
