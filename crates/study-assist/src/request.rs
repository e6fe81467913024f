use std::collections::HashMap;
use std::hash::BuildHasher;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::operation::OperationSpec;

/// Read access to the current value of the view's input controls.
pub trait InputSource: Send + Sync {
    /// Raw (untrimmed) value of the input with the given id, if it exists.
    fn value(&self, input_id: &str) -> Option<String>;
}

impl<S: BuildHasher + Send + Sync> InputSource for HashMap<String, String, S> {
    fn value(&self, input_id: &str) -> Option<String> {
        self.get(input_id).cloned()
    }
}

/// A required input was empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Wire key of the missing field.
    pub field: &'static str,
    /// Message shown to the user.
    pub message: &'static str,
}

/// Body of an outbound request, built from the operation's input fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRequest {
    pub operation: String,
    pub body: Map<String, Value>,
}

impl ActionRequest {
    /// Read, trim and parse every field the operation declares.
    ///
    /// Fails without reading further once a required field is empty.
    pub fn build(spec: &OperationSpec, inputs: &dyn InputSource) -> Result<Self, ValidationError> {
        let mut body = Map::new();

        for field in spec.fields {
            let raw = inputs.value(field.input_id).unwrap_or_default();
            let trimmed = raw.trim();

            if field.required && trimmed.is_empty() {
                return Err(ValidationError {
                    field: field.key,
                    message: spec.missing_message,
                });
            }

            if let Some(value) = field.kind.parse(trimmed) {
                body.insert(field.key.to_owned(), value);
            }
        }

        Ok(Self {
            operation: spec.name.to_owned(),
            body,
        })
    }

    /// Add a field that does not come from an input control.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }

    /// The value of the operation's required field, used to echo the
    /// user's turn in append-only regions.
    pub fn echo<'a>(&'a self, spec: &OperationSpec) -> Option<&'a str> {
        spec.required_fields().find_map(|f| self.get_str(f.key))
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::operation::{CHAT, QUIZ, STUDY_PLAN};

    fn inputs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn builds_study_plan_body_with_typed_fields() {
        let request = ActionRequest::build(
            &STUDY_PLAN,
            &inputs(&[
                ("studyTopic", " Algebra "),
                ("studyDuration", "14"),
                ("studyHours", "1.5"),
                ("currentLevel", "beginner"),
            ]),
        )
        .unwrap();

        assert_eq!(request.operation, "study-plan");
        assert_eq!(
            request.to_json(),
            json!({
                "topic": "Algebra",
                "duration": 14,
                "daily_hours": 1.5,
                "current_level": "beginner",
            })
        );
    }

    #[test]
    fn whitespace_only_required_field_is_rejected() {
        let err = ActionRequest::build(&QUIZ, &inputs(&[("quizTopic", "   ")])).unwrap_err();
        assert_eq!(err.field, "topic");
        assert_eq!(err.to_string(), "Please enter a topic");
    }

    #[test]
    fn missing_input_counts_as_empty() {
        let err = ActionRequest::build(&CHAT, &inputs(&[])).unwrap_err();
        assert_eq!(err.message, "Please enter a message");
    }

    #[test]
    fn unparsable_numbers_are_left_out() {
        let request = ActionRequest::build(
            &QUIZ,
            &inputs(&[("quizTopic", "Rust"), ("numQuestions", "lots")]),
        )
        .unwrap();

        assert_eq!(request.to_json(), json!({ "topic": "Rust" }));
    }

    #[test]
    fn echo_returns_required_value() {
        let request = ActionRequest::build(&CHAT, &inputs(&[("chatInput", " Hello ")]))
            .unwrap()
            .with_field("session_id", "abc");

        assert_eq!(request.echo(&CHAT), Some("Hello"));
        assert_eq!(request.get_str("session_id"), Some("abc"));
    }
}
