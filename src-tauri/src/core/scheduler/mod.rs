pub mod manual;
pub mod runtime;

use crate::domain::errors::MotionError;
use std::fmt;
use std::time::Duration;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Source of repeating callbacks. The controller never sleeps on its own.
pub trait Scheduler: Send + Sync {
    fn schedule_repeating(
        &self,
        interval: Duration,
        callback: TickCallback,
    ) -> Result<CancellationHandle, MotionError>;
}

/// Cancels the timer it was returned for, explicitly or on drop.
pub struct CancellationHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl CancellationHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for CancellationHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for CancellationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::CancellationHandle;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn cancel_runs_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handle = CancellationHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        handle.cancel();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_handle_cancels() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        drop(CancellationHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
