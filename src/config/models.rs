// src/config/models.rs
use serde::Deserialize;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// `API_PORT`
    #[serde(default = "default_port")]
    pub port: u16,

    /// `API_METRICS_PORT`; metrics exposition is off when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            metrics_port: None,
        }
    }
}

impl ServerConfig {
    /// All interfaces on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        ([0, 0, 0, 0], self.port).into()
    }

    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_port.map(|port| ([0, 0, 0, 0], port).into())
    }
}
