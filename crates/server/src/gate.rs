//! Admission control: at most one ranking run at a time, service-wide.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

#[derive(Debug, Clone)]
pub struct RunGate {
    permits: Arc<Semaphore>,
}

/// Held for the whole run; dropping it reopens the gate.
#[derive(Debug)]
pub struct RunPermit {
    _permit: OwnedSemaphorePermit,
}

impl Default for RunGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RunGate {
    pub fn new() -> Self {
        Self { permits: Arc::new(Semaphore::new(1)) }
    }

    /// Take the gate without waiting. `None` means a run is in progress.
    pub fn try_enter(&self) -> Option<RunPermit> {
        self.permits
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| RunPermit { _permit: permit })
    }

    pub fn is_busy(&self) -> bool {
        self.permits.available_permits() == 0
    }
}
