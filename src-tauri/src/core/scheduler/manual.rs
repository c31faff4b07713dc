use super::{CancellationHandle, Scheduler, TickCallback};
use crate::domain::errors::MotionError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

struct ManualTimer {
    id: u64,
    interval: Duration,
    next_due: Duration,
    callback: Option<TickCallback>,
    cancelled: Arc<AtomicBool>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualTimer>,
}

/// Fake clock for driving ticks by hand.
///
/// Nothing fires until [`ManualScheduler::advance`] is called; callbacks run
/// on the caller's thread in due-time order.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.lock().now
    }

    pub fn active_timers(&self) -> usize {
        self.lock()
            .timers
            .iter()
            .filter(|timer| !timer.cancelled.load(Ordering::SeqCst))
            .count()
    }

    pub fn advance(&self, by: Duration) {
        let target = self.lock().now + by;
        loop {
            let (id, mut callback, cancelled) = {
                let mut clock = self.lock();
                clock
                    .timers
                    .retain(|timer| !timer.cancelled.load(Ordering::SeqCst));
                let due = clock
                    .timers
                    .iter_mut()
                    .filter(|timer| timer.next_due <= target && timer.callback.is_some())
                    .min_by_key(|timer| (timer.next_due, timer.id));
                let Some(timer) = due else {
                    clock.now = target;
                    return;
                };
                let now = timer.next_due;
                let picked = (timer.id, timer.callback.take(), timer.cancelled.clone());
                clock.now = now;
                picked
            };
            if let Some(run) = callback.as_mut() {
                run();
            }
            let mut clock = self.lock();
            if let Some(timer) = clock.timers.iter_mut().find(|timer| timer.id == id) {
                if !cancelled.load(Ordering::SeqCst) {
                    timer.callback = callback;
                    timer.next_due += timer.interval;
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ManualClock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(
        &self,
        interval: Duration,
        callback: TickCallback,
    ) -> Result<CancellationHandle, MotionError> {
        let interval = interval.max(MIN_INTERVAL);
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut clock = self.lock();
        let id = clock.next_id;
        clock.next_id += 1;
        let next_due = clock.now + interval;
        clock.timers.push(ManualTimer {
            id,
            interval,
            next_due,
            callback: Some(callback),
            cancelled: cancelled.clone(),
        });
        Ok(CancellationHandle::new(move || {
            cancelled.store(true, Ordering::SeqCst);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::ManualScheduler;
    use crate::core::scheduler::Scheduler;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn counting(calls: &Arc<AtomicUsize>) -> Box<dyn FnMut() + Send> {
        let calls = calls.clone();
        Box::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn fires_once_per_elapsed_interval() {
        let scheduler = ManualScheduler::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let _handle = scheduler
            .schedule_repeating(Duration::from_millis(200), counting(&calls))
            .unwrap();

        scheduler.advance(Duration::from_millis(199));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        scheduler.advance(Duration::from_millis(1000));
        assert_eq!(calls.load(Ordering::SeqCst), 6);
        assert_eq!(scheduler.now(), Duration::from_millis(1200));
    }

    #[test]
    fn cancelled_timer_never_fires_again() {
        let scheduler = ManualScheduler::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let handle = scheduler
            .schedule_repeating(Duration::from_millis(200), counting(&calls))
            .unwrap();
        scheduler.advance(Duration::from_millis(200));
        handle.cancel();
        assert_eq!(scheduler.active_timers(), 0);
        scheduler.advance(Duration::from_secs(5));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn timers_fire_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let slow_order = order.clone();
        let fast_order = order.clone();
        let _slow = scheduler
            .schedule_repeating(
                Duration::from_millis(300),
                Box::new(move || slow_order.lock().unwrap().push("slow")),
            )
            .unwrap();
        let _fast = scheduler
            .schedule_repeating(
                Duration::from_millis(200),
                Box::new(move || fast_order.lock().unwrap().push("fast")),
            )
            .unwrap();
        scheduler.advance(Duration::from_millis(600));
        assert_eq!(
            *order.lock().unwrap(),
            vec!["fast", "slow", "fast", "slow", "fast"]
        );
    }
}
