//! Bodies returned by the `/health` endpoints.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Aggregate report; `status` is the worst status found in `checks`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2024-01-01T12:00:00.000Z",
    "checks": {
        "storage": {
            "status": "healthy",
            "message": "memory backend, 12 rackets",
            "response_time_ms": 0
        }
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// Crate version of the running binary
    #[schema(example = "0.1.0")]
    pub version: String,
    /// RFC 3339 time the report was produced
    #[schema(value_type = String, format = DateTime, example = "2024-01-01T12:00:00.000Z")]
    pub timestamp: String,
    /// Keyed by component, e.g. `storage` or `database`
    pub checks: HashMap<String, ComponentHealth>,
}

/// Ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Outcome of probing one component.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "message": "memory backend, 12 rackets",
    "response_time_ms": 0
}))]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[schema(example = "memory backend, 12 rackets")]
    pub message: Option<String>,
    /// How long the probe took
    #[schema(example = 5)]
    pub response_time_ms: Option<u64>,
}

impl ComponentHealth {
    pub fn healthy(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: Some(message.into()),
            response_time_ms: Some(response_time_ms),
        }
    }

    pub fn unhealthy(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            response_time_ms: Some(response_time_ms),
        }
    }
}

impl HealthResponse {
    /// An empty `checks` map reports healthy.
    pub fn from_checks(version: &str, timestamp: String, checks: HashMap<String, ComponentHealth>) -> Self {
        let status = checks
            .values()
            .map(|check| check.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        Self {
            status,
            version: version.to_string(),
            timestamp,
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_value(HealthStatus::Degraded).unwrap(), "degraded");
        assert!(HealthStatus::Unhealthy > HealthStatus::Degraded);
    }

    #[test]
    fn test_overall_status_is_worst_check() {
        let storage_only = HashMap::from([("storage".to_string(), ComponentHealth::healthy("ok", 1))]);
        let response = HealthResponse::from_checks("0.1.0", "now".to_string(), storage_only);
        assert_eq!(response.status, HealthStatus::Healthy);

        let checks = HashMap::from([
            ("storage".to_string(), ComponentHealth::healthy("ok", 1)),
            (
                "database".to_string(),
                ComponentHealth::unhealthy("Connection failed: timeout", 5000),
            ),
        ]);
        let response = HealthResponse::from_checks("0.1.0", "now".to_string(), checks);
        assert_eq!(response.status, HealthStatus::Unhealthy);
        assert_eq!(response.checks.len(), 2);
    }

    #[test]
    fn test_no_checks_is_healthy() {
        let response = HealthResponse::from_checks("0.1.0", "now".to_string(), HashMap::new());
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.version, "0.1.0");
    }
}
