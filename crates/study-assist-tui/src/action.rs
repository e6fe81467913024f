use std::collections::HashMap;

use study_assist::{OperationSpec, RegionId};

/// Commands returned by the app to the event loop for side-effect execution.
#[derive(Debug)]
pub enum AppCommand {
    /// No side effect needed.
    None,
    /// Quit the application.
    Quit,
    /// Run an operation with a snapshot of its form inputs.
    Submit {
        spec: &'static OperationSpec,
        inputs: HashMap<String, String>,
    },
}

/// How a region's content changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionUpdate {
    Replace(String),
    Append(String),
}

/// Actions dispatched back into the app from async tasks.
#[derive(Debug)]
pub enum Action {
    /// An invocation rendered into one of the regions.
    RegionUpdated { region: RegionId, update: RegionUpdate },
    /// An invocation reached its terminal state.
    Completed {
        operation: &'static str,
        result: Result<(), String>,
    },
}
