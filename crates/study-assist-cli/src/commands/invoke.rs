use std::collections::HashMap;
use std::io::Write;
use std::process::ExitCode;

use study_assist::{
    ActionInvoker, DisplayRegion, InvokeError, OperationSpec, RegionId, Renderer, Transport,
};

/// Prints every update to stdout as it arrives.
pub struct StdoutRegion {
    id: RegionId,
}

impl StdoutRegion {
    pub fn new(spec: &OperationSpec) -> Self {
        Self {
            id: spec.region_id(),
        }
    }

    fn write(&self, content: &str) {
        let mut stdout = std::io::stdout().lock();
        // Broken pipes are not worth aborting over.
        let _ = stdout.write_all(content.as_bytes());
        let _ = stdout.flush();
    }
}

impl DisplayRegion for StdoutRegion {
    fn id(&self) -> &RegionId {
        &self.id
    }

    // A terminal cannot take back printed output, so both policies print.
    fn replace(&self, content: String) {
        self.write(&content);
    }

    fn append(&self, content: String) {
        self.write(&content);
    }
}

/// Merge configured defaults with command-line values into inputs for `spec`.
///
/// `values` are keyed by wire key; `None` leaves the default (if any) in place.
pub fn collect_inputs<'a>(
    spec: &OperationSpec,
    defaults: &HashMap<String, String>,
    values: impl IntoIterator<Item = (&'a str, Option<String>)>,
) -> HashMap<String, String> {
    let mut inputs = defaults.clone();

    for (key, value) in values {
        let (Some(field), Some(value)) = (spec.field(key), value) else {
            continue;
        };
        inputs.insert(field.input_id.to_owned(), value);
    }

    inputs
}

/// Run one operation and map its outcome to an exit code.
///
/// The outcome has already been rendered into `region` either way.
pub async fn run<T: Transport, R: Renderer>(
    invoker: &ActionInvoker<T, R>,
    spec: &OperationSpec,
    inputs: &HashMap<String, String>,
    region: &dyn DisplayRegion,
) -> ExitCode {
    match invoker.invoke(spec, inputs, region).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(InvokeError::Validation(_)) => ExitCode::from(2),
        Err(_) => ExitCode::FAILURE,
    }
}
