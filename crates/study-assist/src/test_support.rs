use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::{BusyIndicator, DisplayRegion, RegionId, Transport, TransportError};

/// Build an input map from `(input_id, value)` pairs.
pub fn inputs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(id, value)| ((*id).to_owned(), (*value).to_owned()))
        .collect()
}

/// Transport with canned replies per path. Records every call.
pub struct StubTransport {
    replies: HashMap<String, Result<Value, TransportError>>,
    calls: Mutex<Vec<(String, Value)>>,
    busy: Option<BusyIndicator>,
    observed_busy: Mutex<Vec<bool>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            busy: None,
            observed_busy: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, path: &str, body: Value) -> Self {
        self.replies.insert(path.to_owned(), Ok(body));
        self
    }

    pub fn fail(mut self, path: &str, error: TransportError) -> Self {
        self.replies.insert(path.to_owned(), Err(error));
        self
    }

    /// Record the indicator's visibility at the moment each request is sent.
    pub fn observe_busy(mut self, busy: BusyIndicator) -> Self {
        self.busy = Some(busy);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn observed_busy(&self) -> Vec<bool> {
        self.observed_busy.lock().unwrap().clone()
    }
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Transport for StubTransport {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_owned(), body.clone()));

        if let Some(busy) = &self.busy {
            self.observed_busy.lock().unwrap().push(busy.is_visible());
        }

        self.replies
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Status {
                status: 404,
                body: format!("no stub for {path}"),
            }))
    }
}

/// Region that keeps its content as a list of rendered fragments.
pub struct InMemoryRegion {
    id: RegionId,
    entries: Mutex<Vec<String>>,
    replaces: Mutex<usize>,
}

impl InMemoryRegion {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: RegionId::new(id),
            entries: Mutex::new(Vec::new()),
            replaces: Mutex::new(0),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn content(&self) -> String {
        self.entries.lock().unwrap().concat()
    }

    pub fn replace_count(&self) -> usize {
        *self.replaces.lock().unwrap()
    }
}

impl DisplayRegion for InMemoryRegion {
    fn id(&self) -> &RegionId {
        &self.id
    }

    fn replace(&self, content: String) {
        let mut entries = self.entries.lock().unwrap();
        entries.clear();
        entries.push(content);
        *self.replaces.lock().unwrap() += 1;
    }

    fn append(&self, content: String) {
        self.entries.lock().unwrap().push(content);
    }
}
