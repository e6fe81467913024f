use std::fmt;

use serde_json::Value;

use crate::region::RegionId;
use crate::request::ActionRequest;

/// How a raw input string becomes a JSON value in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
}

impl FieldKind {
    /// Convert an already-trimmed input. Returns `None` when the input is
    /// empty or does not parse, in which case the field is left out of the
    /// body and the server default applies.
    pub fn parse(self, trimmed: &str) -> Option<Value> {
        if trimmed.is_empty() {
            return None;
        }

        match self {
            Self::Text => Some(Value::String(trimmed.to_owned())),
            Self::Integer => trimmed.parse::<i64>().ok().map(Value::from),
            Self::Float => trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
        }
    }
}

/// One input field read by an operation's payload builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Identifier of the input control the value is read from.
    pub input_id: &'static str,
    /// Key the value is sent under.
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn new(input_id: &'static str, key: &'static str, kind: FieldKind) -> Self {
        Self {
            input_id,
            key,
            kind,
            required: false,
        }
    }

    const fn required(input_id: &'static str, key: &'static str) -> Self {
        Self {
            input_id,
            key,
            kind: FieldKind::Text,
            required: true,
        }
    }
}

/// Whether an outcome replaces a region's content or is appended to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPolicy {
    Replace,
    Append,
}

/// Fixed configuration of one remote operation.
///
/// Everything that differs between operations lives here; the request
/// lifecycle itself is shared (see [`crate::ActionInvoker`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub name: &'static str,
    pub path: &'static str,
    pub fields: &'static [FieldSpec],
    /// Rendered when a required field is empty.
    pub missing_message: &'static str,
    /// Response field holding the text to render on success.
    pub result_key: &'static str,
    pub region: &'static str,
    pub icon: &'static str,
    /// Panel heading. `{key}` placeholders are filled from the request body.
    pub title: &'static str,
    pub content_class: &'static str,
    pub policy: RenderPolicy,
    /// The input is cleared once the request has been sent.
    pub clears_input: bool,
    /// The client's chat session id is added to the body.
    pub session_scoped: bool,
}

impl OperationSpec {
    pub fn region_id(&self) -> RegionId {
        RegionId::new(self.region)
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Heading for a success panel, with placeholders substituted.
    pub fn title_for(&self, request: &ActionRequest) -> String {
        let mut title = self.title.to_owned();
        for field in self.fields {
            let placeholder = format!("{{{}}}", field.key);
            if title.contains(&placeholder) {
                let value = request.get_str(field.key).unwrap_or_default();
                title = title.replace(&placeholder, value);
            }
        }
        title
    }
}

impl fmt::Display for OperationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub const CHAT: OperationSpec = OperationSpec {
    name: "chat",
    path: "/api/chat",
    fields: &[FieldSpec::required("chatInput", "message")],
    missing_message: "Please enter a message",
    result_key: "response",
    region: "chatMessages",
    icon: "fa-robot",
    title: "AI Assistant",
    content_class: "message",
    policy: RenderPolicy::Append,
    clears_input: true,
    session_scoped: true,
};

pub const STUDY_PLAN: OperationSpec = OperationSpec {
    name: "study-plan",
    path: "/api/study-plan",
    fields: &[
        FieldSpec::required("studyTopic", "topic"),
        FieldSpec::new("studyDuration", "duration", FieldKind::Integer),
        FieldSpec::new("studyHours", "daily_hours", FieldKind::Float),
        FieldSpec::new("currentLevel", "current_level", FieldKind::Text),
    ],
    missing_message: "Please enter a topic",
    result_key: "study_plan",
    region: "studyPlanResult",
    icon: "fa-calendar-check",
    title: "Your Personalized Study Plan",
    content_class: "plan-content",
    policy: RenderPolicy::Replace,
    clears_input: false,
    session_scoped: false,
};

pub const QUIZ: OperationSpec = OperationSpec {
    name: "quiz",
    path: "/api/quiz",
    fields: &[
        FieldSpec::required("quizTopic", "topic"),
        FieldSpec::new("numQuestions", "num_questions", FieldKind::Integer),
        FieldSpec::new("quizDifficulty", "difficulty", FieldKind::Text),
    ],
    missing_message: "Please enter a topic",
    result_key: "quiz",
    region: "quizResult",
    icon: "fa-clipboard-check",
    title: "Your Quiz",
    content_class: "quiz-content",
    policy: RenderPolicy::Replace,
    clears_input: false,
    session_scoped: false,
};

pub const EXPLAIN: OperationSpec = OperationSpec {
    name: "explain",
    path: "/api/explain",
    fields: &[
        FieldSpec::required("explainConcept", "concept"),
        FieldSpec::new("explainLevel", "level", FieldKind::Text),
    ],
    missing_message: "Please enter a concept",
    result_key: "explanation",
    region: "explainResult",
    icon: "fa-lightbulb",
    title: "Explanation: {concept}",
    content_class: "explanation-content",
    policy: RenderPolicy::Replace,
    clears_input: false,
    session_scoped: false,
};

pub const CODE_REVIEW: OperationSpec = OperationSpec {
    name: "code-review",
    path: "/api/code-review",
    fields: &[
        FieldSpec::required("codeInput", "code"),
        FieldSpec::new("codeLanguage", "language", FieldKind::Text),
    ],
    missing_message: "Please enter some code",
    result_key: "review",
    region: "codeReviewResult",
    icon: "fa-code",
    title: "Code Review Results",
    content_class: "review-content",
    policy: RenderPolicy::Replace,
    clears_input: false,
    session_scoped: false,
};

pub const RESOURCES: OperationSpec = OperationSpec {
    name: "resources",
    path: "/api/resources",
    fields: &[
        FieldSpec::required("resourceTopic", "topic"),
        FieldSpec::new("resourceType", "resource_type", FieldKind::Text),
    ],
    missing_message: "Please enter a topic",
    result_key: "resources",
    region: "resourcesResult",
    icon: "fa-book",
    title: "Learning Resources for {topic}",
    content_class: "resources-content",
    policy: RenderPolicy::Replace,
    clears_input: false,
    session_scoped: false,
};

static CATALOG: [OperationSpec; 6] = [CHAT, STUDY_PLAN, QUIZ, EXPLAIN, CODE_REVIEW, RESOURCES];

/// All operations in display order.
pub fn catalog() -> &'static [OperationSpec] {
    &CATALOG
}

/// Look up an operation by name.
pub fn find(name: &str) -> Option<&'static OperationSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}
