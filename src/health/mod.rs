// src/health/mod.rs
mod status;

pub use status::HealthCheck;
