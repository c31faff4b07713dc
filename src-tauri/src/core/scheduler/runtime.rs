use super::{CancellationHandle, Scheduler, TickCallback};
use crate::domain::errors::MotionError;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Repeating timer backed by a Tokio task per schedule.
///
/// The runtime is looked up when scheduling, so `schedule_repeating` must
/// be called from inside one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(
        &self,
        interval: Duration,
        mut callback: TickCallback,
    ) -> Result<CancellationHandle, MotionError> {
        let runtime = Handle::try_current()
            .map_err(|error| MotionError::SchedulerUnavailable(error.to_string()))?;
        let interval = interval.max(MIN_INTERVAL);
        let task = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                callback();
            }
        });
        let abort = task.abort_handle();
        Ok(CancellationHandle::new(move || abort.abort()))
    }
}

#[cfg(test)]
mod tests {
    use super::TokioScheduler;
    use crate::core::scheduler::Scheduler;
    use crate::domain::errors::MotionError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn ticks_on_cadence_until_cancelled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handle = TokioScheduler::new()
            .schedule_repeating(
                Duration::from_millis(200),
                Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        handle.cancel();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn scheduling_outside_runtime_fails() {
        let result =
            TokioScheduler::new().schedule_repeating(Duration::from_millis(200), Box::new(|| {}));
        assert!(matches!(result, Err(MotionError::SchedulerUnavailable(_))));
    }
}
