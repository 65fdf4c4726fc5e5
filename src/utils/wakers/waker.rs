use std::sync::{Arc, Mutex, PoisonError};
use std::task::Wake;

use super::ReadinessVec;

/// A waker which marks its participant as ready and then forwards the wake
/// to the parent task.
#[derive(Debug, Clone)]
pub(crate) struct InlineWakerVec {
    pub(crate) id: usize,
    pub(crate) readiness: Arc<Mutex<ReadinessVec>>,
}

impl InlineWakerVec {
    /// Create a new instance of `InlineWakerVec`.
    pub(crate) fn new(id: usize, readiness: Arc<Mutex<ReadinessVec>>) -> Self {
        Self { id, readiness }
    }
}

impl Wake for InlineWakerVec {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref()
    }

    fn wake_by_ref(self: &Arc<Self>) {
        let mut readiness = self
            .readiness
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Only forward the first wake; the parent is already scheduled otherwise.
        if !readiness.set_ready(self.id) {
            if let Some(waker) = readiness.parent_waker() {
                waker.wake_by_ref();
            }
        }
    }
}
