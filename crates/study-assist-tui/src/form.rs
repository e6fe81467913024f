use std::collections::HashMap;

use study_assist::{FieldSpec, OperationSpec};

const LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];
const DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];
const LANGUAGES: &[&str] = &[
    "python",
    "javascript",
    "java",
    "cpp",
    "rust",
    "go",
    "typescript",
];
const RESOURCE_TYPES: &[&str] = &["all", "videos", "articles", "books"];

/// Fixed options for inputs that are pick-lists rather than free text.
pub fn choices_for(input_id: &str) -> Option<&'static [&'static str]> {
    match input_id {
        "currentLevel" | "explainLevel" => Some(LEVELS),
        "quizDifficulty" => Some(DIFFICULTIES),
        "codeLanguage" => Some(LANGUAGES),
        "resourceType" => Some(RESOURCE_TYPES),
        _ => None,
    }
}

/// Initial value for an input when the config does not provide one.
pub fn default_value(input_id: &str) -> Option<&'static str> {
    match input_id {
        "studyDuration" => Some("7"),
        "studyHours" => Some("2"),
        "numQuestions" => Some("5"),
        "quizDifficulty" => Some("medium"),
        other => choices_for(other).and_then(|c| c.first().copied()),
    }
}

/// Human label for a wire key: `daily_hours` becomes `Daily hours`.
pub fn label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Editable inputs of one operation.
#[derive(Debug, Clone)]
pub struct Form {
    pub spec: &'static OperationSpec,
    /// One value per entry in `spec.fields`.
    pub values: Vec<String>,
    pub focused: usize,
}

impl Form {
    pub fn new(spec: &'static OperationSpec, defaults: &HashMap<String, String>) -> Self {
        let values = spec
            .fields
            .iter()
            .map(|field| {
                defaults
                    .get(field.input_id)
                    .cloned()
                    .or_else(|| default_value(field.input_id).map(str::to_owned))
                    .unwrap_or_default()
            })
            .collect();

        Self {
            spec,
            values,
            focused: 0,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FieldSpec, &str)> {
        self.spec
            .fields
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Snapshot of the current values keyed by input id.
    pub fn inputs(&self) -> HashMap<String, String> {
        self.fields()
            .map(|(field, value)| (field.input_id.to_owned(), value.to_owned()))
            .collect()
    }

    pub fn focused_field(&self) -> &FieldSpec {
        &self.spec.fields[self.focused]
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.values.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + self.values.len() - 1) % self.values.len();
    }

    pub fn is_choice(&self, index: usize) -> bool {
        choices_for(self.spec.fields[index].input_id).is_some()
    }

    pub fn push_char(&mut self, c: char) {
        if !self.is_choice(self.focused) {
            self.values[self.focused].push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if !self.is_choice(self.focused) {
            self.values[self.focused].pop();
        }
    }

    /// Move the focused pick-list to its next (or previous) option.
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(options) = choices_for(self.focused_field().input_id) else {
            return;
        };

        let current = &self.values[self.focused];
        let position = options
            .iter()
            .position(|o| *o == current.as_str())
            .unwrap_or(0);
        let next = if forward {
            (position + 1) % options.len()
        } else {
            (position + options.len() - 1) % options.len()
        };
        self.values[self.focused] = options[next].to_owned();
    }

    /// Empty the required inputs (used after a conversational send).
    pub fn clear_required(&mut self) {
        for (index, field) in self.spec.fields.iter().enumerate() {
            if field.required {
                self.values[index].clear();
            }
        }
    }
}
