use serde_json::Value;
use study_assist::{Transport, TransportError};

use crate::health::HealthStatus;

/// Origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const USER_AGENT: &str = concat!("study-assist/", env!("CARGO_PKG_VERSION"));

/// Talks JSON over HTTP to the study assistant backend.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Query the backend's `/health` endpoint.
    pub async fn health(&self) -> Result<HealthStatus, TransportError> {
        let response = self
            .client
            .get(self.url("/health"))
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.url(path);
        tracing::trace!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let parsed = serde_json::from_str::<Value>(&text);

        if !status.is_success() {
            // The backend reports its own failures as HTTP 500 with a
            // `success: false` envelope; keep the server's message.
            if let Ok(value) = parsed
                && value.get("success") == Some(&Value::Bool(false))
            {
                return Ok(value);
            }

            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text.trim().to_owned(),
            });
        }

        parsed.map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let transport = HttpTransport::new("http://localhost:5000/");
        assert_eq!(transport.url("/api/quiz"), "http://localhost:5000/api/quiz");
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(HttpTransport::default().base_url(), DEFAULT_BASE_URL);
    }
}
