use study_assist::{DisplayRegion, RegionId};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::{Action, RegionUpdate};

/// Region handle given to an invocation task. Updates are forwarded to the
/// event loop, which owns the actual region state.
pub struct ChannelRegion {
    id: RegionId,
    tx: UnboundedSender<Action>,
}

impl ChannelRegion {
    pub fn new(id: RegionId, tx: UnboundedSender<Action>) -> Self {
        Self { id, tx }
    }

    fn send(&self, update: RegionUpdate) {
        // The receiver only goes away when the UI is shutting down.
        let _ = self.tx.send(Action::RegionUpdated {
            region: self.id.clone(),
            update,
        });
    }
}

impl DisplayRegion for ChannelRegion {
    fn id(&self) -> &RegionId {
        &self.id
    }

    fn replace(&self, content: String) {
        self.send(RegionUpdate::Replace(content));
    }

    fn append(&self, content: String) {
        self.send(RegionUpdate::Append(content));
    }
}
