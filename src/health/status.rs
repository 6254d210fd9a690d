// src/health/status.rs
use chrono::Utc;
use serde::Serialize;

/// Liveness payload, built fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: String,
    /// Unix seconds.
    pub timestamp: i64,
}

impl HealthCheck {
    pub fn now() -> Self {
        Self {
            status: "OK".to_string(),
            timestamp: Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_ok_with_current_time() {
        let before = Utc::now().timestamp();
        let hc = HealthCheck::now();
        let after = Utc::now().timestamp();

        assert_eq!(hc.status, "OK");
        assert!(hc.timestamp >= before && hc.timestamp <= after);
    }

    #[test]
    fn serializes_status_and_timestamp() {
        let hc = HealthCheck {
            status: "OK".to_string(),
            timestamp: 1_700_000_000,
        };
        assert_eq!(
            serde_json::to_string(&hc).unwrap(),
            r#"{"status":"OK","timestamp":1700000000}"#
        );
    }
}
