use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use study_assist::operation;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Backend origin, e.g. `http://127.0.0.1:5000`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Chat session id sent with every chat message.
    #[serde(default)]
    pub session_id: Option<String>,

    /// Per-operation defaults for the optional fields, keyed by wire key.
    ///
    /// ```toml
    /// [defaults.quiz]
    /// num_questions = 10
    /// difficulty = "hard"
    /// ```
    #[serde(default)]
    pub defaults: BTreeMap<String, BTreeMap<String, DefaultValue>>,
}

/// A configured default; TOML numbers are accepted for numeric fields.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl AppConfig {
    /// Flatten `[defaults.*]` into input values keyed by input id.
    ///
    /// Unknown operations and fields are skipped with a warning.
    pub fn input_defaults(&self) -> HashMap<String, String> {
        let mut inputs = HashMap::new();

        for (name, fields) in &self.defaults {
            let Some(spec) = operation::find(name) else {
                tracing::warn!(operation = %name, "ignoring defaults for unknown operation");
                continue;
            };
            for (key, value) in fields {
                match spec.field(key) {
                    Some(field) => {
                        inputs.insert(field.input_id.to_owned(), value.to_string());
                    }
                    None => {
                        tracing::warn!(operation = %name, field = %key, "ignoring unknown default");
                    }
                }
            }
        }

        inputs
    }
}

/// Config file path: `~/.config/study-assist/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("study-assist").join("config.toml"))
}

/// Load config from file, falling back to defaults if missing.
pub fn load_config() -> AppConfig {
    if let Some(path) = config_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => return config,
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to parse config, using defaults"
            ),
        }
    }

    AppConfig::default()
}
