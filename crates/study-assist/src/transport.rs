use std::sync::Arc;

use serde_json::Value;

/// Faults between sending a request and holding a decoded JSON body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    Decode(String),
}

/// Sends a JSON body to an operation endpoint and returns the JSON reply.
///
/// Implementations treat the body as opaque; interpreting the `success`
/// envelope is left to the caller.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        (**self).post(path, body).await
    }
}
