use std::fmt;
use std::sync::Arc;

use crate::operation::RenderPolicy;

/// Stable identifier of a display region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A location in the view that outcomes are rendered into.
pub trait DisplayRegion: Send + Sync {
    fn id(&self) -> &RegionId;

    /// Swap the region's whole content for `content`.
    fn replace(&self, content: String);

    /// Add `content` after whatever the region already shows.
    fn append(&self, content: String);

    fn apply(&self, policy: RenderPolicy, content: String) {
        match policy {
            RenderPolicy::Replace => self.replace(content),
            RenderPolicy::Append => self.append(content),
        }
    }
}

impl<T: DisplayRegion + ?Sized> DisplayRegion for Arc<T> {
    fn id(&self) -> &RegionId {
        (**self).id()
    }

    fn replace(&self, content: String) {
        (**self).replace(content)
    }

    fn append(&self, content: String) {
        (**self).append(content)
    }
}
