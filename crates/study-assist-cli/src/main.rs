mod commands;
mod config;
mod logging;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use study_assist::operation::{CHAT, CODE_REVIEW, EXPLAIN, QUIZ, RESOURCES, STUDY_PLAN};
use study_assist::{ActionInvoker, HtmlRenderer, OperationSpec, PlainRenderer, Renderer, Transport};
use study_assist_http::{DEFAULT_BASE_URL, HttpTransport};

use crate::commands::invoke::{StdoutRegion, collect_inputs};

#[derive(Parser)]
#[command(name = "study-assist")]
#[command(about = "Ask an AI study assistant for plans, quizzes, explanations and reviews")]
struct Cli {
    /// Backend origin (defaults to the config file, then http://127.0.0.1:5000)
    #[arg(long, global = true, env = "STUDY_ASSIST_URL")]
    base_url: Option<String>,

    /// Print HTML fragments instead of plain text
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Chat with the assistant
    Chat {
        /// Message to send; starts an interactive session when omitted
        message: Option<String>,
        /// Session id for the conversation history (overrides config)
        #[arg(long)]
        session: Option<String>,
    },
    /// Generate a personalized study plan
    StudyPlan {
        /// Subject to study
        topic: String,
        /// Length of the plan in days
        #[arg(long)]
        duration: Option<u32>,
        /// Hours available per day
        #[arg(long)]
        daily_hours: Option<f64>,
        /// Current level (beginner, intermediate, advanced)
        #[arg(long)]
        level: Option<String>,
    },
    /// Generate a quiz
    Quiz {
        /// Quiz subject
        topic: String,
        /// Number of questions
        #[arg(long)]
        questions: Option<u32>,
        /// Difficulty (easy, medium, hard)
        #[arg(long)]
        difficulty: Option<String>,
    },
    /// Explain a concept
    Explain {
        /// Concept to explain
        concept: String,
        /// Audience level (beginner, intermediate, advanced, expert)
        #[arg(long)]
        level: Option<String>,
    },
    /// Review a piece of code
    CodeReview {
        /// File to review (reads stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Programming language (guessed from the file extension when omitted)
        #[arg(long)]
        language: Option<String>,
    },
    /// Suggest learning resources
    Resources {
        /// Subject to find resources for
        topic: String,
        /// Resource type (mixed, books, courses, videos, articles, practice)
        #[arg(long = "type")]
        resource_type: Option<String>,
    },
    /// Check that the backend is up
    Health,
    /// Launch the interactive TUI
    Tui,
}

/// What a parsed command asks for.
enum Plan {
    Invoke(&'static OperationSpec, HashMap<String, String>),
    ChatSession,
    Health,
    Tui,
}

fn plan(command: Command, defaults: &HashMap<String, String>) -> Result<Plan> {
    let invoke = |spec: &'static OperationSpec, values: Vec<(&str, Option<String>)>| {
        Plan::Invoke(spec, collect_inputs(spec, defaults, values))
    };

    Ok(match command {
        Command::Chat { message: None, .. } => Plan::ChatSession,
        Command::Chat {
            message: Some(message),
            ..
        } => invoke(&CHAT, vec![("message", Some(message))]),
        Command::StudyPlan {
            topic,
            duration,
            daily_hours,
            level,
        } => invoke(
            &STUDY_PLAN,
            vec![
                ("topic", Some(topic)),
                ("duration", duration.map(|d| d.to_string())),
                ("daily_hours", daily_hours.map(|h| h.to_string())),
                ("current_level", level),
            ],
        ),
        Command::Quiz {
            topic,
            questions,
            difficulty,
        } => invoke(
            &QUIZ,
            vec![
                ("topic", Some(topic)),
                ("num_questions", questions.map(|n| n.to_string())),
                ("difficulty", difficulty),
            ],
        ),
        Command::Explain { concept, level } => {
            invoke(&EXPLAIN, vec![("concept", Some(concept)), ("level", level)])
        }
        Command::CodeReview { file, language } => {
            let code = read_code(file.as_deref())?;
            let language = language.or_else(|| file.as_deref().and_then(language_for_path));
            invoke(
                &CODE_REVIEW,
                vec![("code", Some(code)), ("language", language)],
            )
        }
        Command::Resources {
            topic,
            resource_type,
        } => invoke(
            &RESOURCES,
            vec![("topic", Some(topic)), ("resource_type", resource_type)],
        ),
        Command::Health => Plan::Health,
        Command::Tui => Plan::Tui,
    })
}

fn read_code(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("failed to read code from stdin"),
    }
}

fn language_for_path(path: &Path) -> Option<String> {
    let language = match path.extension()?.to_str()? {
        "py" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "java" => "java",
        "cpp" | "cc" | "cxx" | "hpp" | "h" => "cpp",
        "rs" => "rust",
        "go" => "go",
        _ => return None,
    };
    Some(language.to_owned())
}

fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("could not determine cache directory")?;
    let dir = base.join("study-assist");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create cache directory: {}", dir.display()))?;
    Ok(dir)
}

async fn perform<R: Renderer>(
    invoker: ActionInvoker<HttpTransport, R>,
    request: Option<(&'static OperationSpec, HashMap<String, String>)>,
    defaults: &HashMap<String, String>,
) -> Result<ExitCode> {
    match request {
        Some((spec, inputs)) => {
            let region = StdoutRegion::new(spec);
            Ok(commands::invoke::run(&invoker, spec, &inputs, &region).await)
        }
        None => {
            let region = StdoutRegion::new(&CHAT);
            commands::chat::repl(&invoker, defaults, &region).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = match cli.command {
        Command::Tui => Some(logging::init_file(&cache_dir()?)),
        _ => {
            logging::init_stderr();
            None
        }
    };

    let app_config = config::load_config();
    let base_url = cli
        .base_url
        .or(app_config.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    let session_id = match &cli.command {
        Command::Chat {
            session: Some(session),
            ..
        } => Some(session.clone()),
        _ => app_config.session_id.clone(),
    };
    let defaults = app_config.input_defaults();
    let transport = HttpTransport::new(base_url.as_str());

    tracing::debug!(base_url = %base_url, "using backend");

    let request = match plan(cli.command, &defaults)? {
        Plan::Health => return commands::health::run(&transport).await,
        Plan::Tui => {
            let transport: Arc<dyn Transport> = Arc::new(transport);
            let mut invoker = ActionInvoker::new(transport).with_renderer(PlainRenderer);
            if let Some(session_id) = session_id {
                invoker = invoker.with_session_id(session_id);
            }
            study_assist_tui::run(Arc::new(invoker), base_url, defaults).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Plan::Invoke(spec, inputs) => Some((spec, inputs)),
        Plan::ChatSession => None,
    };

    let mut invoker = ActionInvoker::new(transport);
    if let Some(session_id) = session_id {
        invoker = invoker.with_session_id(session_id);
    }

    if cli.html {
        perform(invoker.with_renderer(HtmlRenderer), request, &defaults).await
    } else {
        perform(invoker.with_renderer(PlainRenderer), request, &defaults).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("study-assist").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn study_plan_flags_map_to_inputs() {
        let cli = parse(&[
            "study-plan",
            "Algebra",
            "--duration",
            "14",
            "--daily-hours",
            "1.5",
            "--level",
            "beginner",
        ]);

        let Plan::Invoke(spec, inputs) = plan(cli.command, &HashMap::new()).unwrap() else {
            panic!("expected an invocation");
        };
        assert_eq!(spec.name, "study-plan");
        assert_eq!(inputs["studyTopic"], "Algebra");
        assert_eq!(inputs["studyDuration"], "14");
        assert_eq!(inputs["studyHours"], "1.5");
        assert_eq!(inputs["currentLevel"], "beginner");
    }

    #[test]
    fn omitted_flags_keep_configured_defaults() {
        let cli = parse(&["quiz", "Graphs"]);
        let defaults = HashMap::from([("quizDifficulty".to_owned(), "hard".to_owned())]);

        let Plan::Invoke(_, inputs) = plan(cli.command, &defaults).unwrap() else {
            panic!("expected an invocation");
        };
        assert_eq!(inputs["quizTopic"], "Graphs");
        assert_eq!(inputs["quizDifficulty"], "hard");
        assert!(!inputs.contains_key("numQuestions"));
    }

    #[test]
    fn chat_without_message_starts_a_session() {
        let cli = parse(&["chat"]);
        assert!(matches!(
            plan(cli.command, &HashMap::new()).unwrap(),
            Plan::ChatSession
        ));
    }

    #[test]
    fn resources_type_flag() {
        let cli = parse(&["resources", "SQL", "--type", "books"]);
        let Plan::Invoke(_, inputs) = plan(cli.command, &HashMap::new()).unwrap() else {
            panic!("expected an invocation");
        };
        assert_eq!(inputs["resourceType"], "books");
    }

    #[test]
    fn base_url_flag_is_global() {
        let cli = parse(&["health", "--base-url", "http://study.local"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://study.local"));
    }

    #[test]
    fn language_guessed_from_extension() {
        assert_eq!(language_for_path(Path::new("main.rs")).as_deref(), Some("rust"));
        assert_eq!(language_for_path(Path::new("app.py")).as_deref(), Some("python"));
        assert_eq!(language_for_path(Path::new("README")), None);
        assert_eq!(language_for_path(Path::new("notes.txt")), None);
    }
}
