use std::sync::Arc;

use tokio::sync::watch;

/// Shared busy indicator, visible while at least one request is in flight.
///
/// Each request holds a [`BusyToken`]; the indicator counts live tokens
/// rather than tracking a single flag, so overlapping requests keep it
/// visible until the last one finishes. Clones share the same count.
#[derive(Debug, Clone)]
pub struct BusyIndicator {
    in_flight: Arc<watch::Sender<usize>>,
}

impl BusyIndicator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            in_flight: Arc::new(tx),
        }
    }

    /// Mark one more request in flight. Dropping the token releases it.
    pub fn acquire(&self) -> BusyToken {
        self.in_flight.send_modify(|count| *count += 1);
        BusyToken {
            indicator: self.clone(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Receiver notified on every change of the in-flight count.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.in_flight.subscribe()
    }

    fn release(&self) {
        self.in_flight
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}

impl Default for BusyIndicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that a request is in flight. Releases its slot when dropped,
/// whichever way the request ended.
#[must_use = "the indicator is released as soon as the token is dropped"]
#[derive(Debug)]
pub struct BusyToken {
    indicator: BusyIndicator,
}

impl Drop for BusyToken {
    fn drop(&mut self) {
        self.indicator.release();
    }
}
