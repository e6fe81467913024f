use std::fmt;

use serde::Deserialize;

/// Response from the backend's health check.
/// `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        if let Some(version) = &self.version {
            write!(f, " (v{version})")?;
        }
        if let Some(timestamp) = &self.timestamp {
            write!(f, " at {timestamp}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_optional_parts() {
        let status = HealthStatus {
            status: "healthy".into(),
            timestamp: Some("2026-01-01T00:00:00".into()),
            version: Some("1.0.0".into()),
        };
        assert!(status.is_healthy());
        assert_eq!(status.to_string(), "healthy (v1.0.0) at 2026-01-01T00:00:00");
    }

    #[test]
    fn parses_minimal_body() {
        let status: HealthStatus = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert!(!status.is_healthy());
        assert_eq!(status.to_string(), "degraded");
    }
}
