use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::transport::TransportError;

/// Wire envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// Interpreted response of a remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResponse {
    Success { payload: BTreeMap<String, String> },
    Failure { message: String },
}

impl ActionResponse {
    /// Interpret a decoded JSON body. Anything without a boolean `success`
    /// is a malformed response.
    pub fn from_value(value: Value) -> Result<Self, TransportError> {
        let envelope: Envelope = serde_json::from_value(value)
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        if !envelope.success {
            return Ok(Self::Failure {
                message: envelope.error.unwrap_or_default(),
            });
        }

        let payload = envelope
            .rest
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();

        Ok(Self::Success { payload })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// A payload field of a successful response.
    pub fn field(&self, key: &str) -> Option<&str> {
        match self {
            Self::Success { payload } => payload.get(key).map(String::as_str),
            Self::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_keeps_string_fields() {
        let response = ActionResponse::from_value(json!({
            "success": true,
            "quiz": "Q1\nQ2",
            "topic": "Rust",
            "num_questions": 5,
        }))
        .unwrap();

        assert!(response.is_success());
        assert_eq!(response.field("quiz"), Some("Q1\nQ2"));
        assert_eq!(response.field("num_questions"), Some("5"));
        assert_eq!(response.field("missing"), None);
    }

    #[test]
    fn failure_carries_server_message() {
        let response =
            ActionResponse::from_value(json!({ "success": false, "error": "quota exceeded" }))
                .unwrap();

        assert_eq!(
            response,
            ActionResponse::Failure {
                message: "quota exceeded".into()
            }
        );
    }

    #[test]
    fn failure_without_message_is_empty() {
        let response = ActionResponse::from_value(json!({ "success": false })).unwrap();
        assert_eq!(response, ActionResponse::Failure { message: String::new() });
    }

    #[test]
    fn missing_success_flag_is_decode_error() {
        let result = ActionResponse::from_value(json!({ "response": "hi" }));
        assert!(matches!(result, Err(TransportError::Decode(_))));
    }

    #[test]
    fn non_object_body_is_decode_error() {
        let result = ActionResponse::from_value(json!(["not", "an", "envelope"]));
        assert!(matches!(result, Err(TransportError::Decode(_))));
    }
}
