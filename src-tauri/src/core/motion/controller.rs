use crate::core::motion::geometry::{
    clamp_speed, heading_degrees, pick_target, speed_label, step_speed, target_range,
    toggle_label, transition_secs, MotionConfig, TargetRange,
};
use crate::core::scheduler::{CancellationHandle, Scheduler};
use crate::domain::errors::MotionError;
use crate::domain::models::{Bounds, MotionSnapshot, MotionState, SpeedStep};
use crate::domain::state_machine::{MotionMachine, MotionPhase};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::watch;
use uuid::Uuid;

struct ControllerInner {
    state: MotionState,
    machine: MotionMachine,
    range: Option<TargetRange>,
    rng: Box<dyn RngCore + Send>,
    timer: Option<CancellationHandle>,
    tick: u64,
    session_id: Option<Uuid>,
}

struct Shared {
    config: MotionConfig,
    inner: Mutex<ControllerInner>,
    updates: watch::Sender<MotionSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &ControllerInner) {
        self.updates.send_replace(snapshot_of(inner, &self.config));
    }

    fn on_tick(&self, generation: u64) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        if !inner.machine.accepts_tick(generation) {
            return;
        }
        let Some(range) = inner.range else {
            return;
        };
        let previous = inner.state.position;
        let next = pick_target(&range, &mut inner.rng);
        inner.state.angle = heading_degrees(previous, next, inner.state.angle);
        inner.state.position = next;
        inner.tick += 1;
        tracing::debug!(
            tick = inner.tick,
            x = next.x,
            y = next.y,
            angle = inner.state.angle,
            "motion tick"
        );
        self.publish(inner);
    }

    /// Cancels the timer and marks the state idle. Returns false if it
    /// already was.
    fn halt(inner: &mut ControllerInner) -> bool {
        if let Some(timer) = inner.timer.take() {
            timer.cancel();
        }
        let was_running = inner.machine.stop();
        inner.state.running = false;
        inner.session_id = None;
        was_running
    }
}

fn snapshot_of(inner: &ControllerInner, config: &MotionConfig) -> MotionSnapshot {
    MotionSnapshot {
        state: inner.state,
        transition_secs: transition_secs(inner.state.speed, config),
        tick: inner.tick,
        session_id: inner.session_id,
        toggle_label: toggle_label(inner.state.running).to_string(),
        speed_label: speed_label(inner.state.speed),
        published_at: Utc::now(),
    }
}

/// Owns the motion state and the single tick source that moves it.
///
/// Every change is published to subscribers as a [`MotionSnapshot`]; the
/// presentation layer animates toward the published position over
/// `snapshot.transition_secs`.
pub struct MotionController {
    shared: Arc<Shared>,
    scheduler: Arc<dyn Scheduler>,
}

impl MotionController {
    pub fn new(scheduler: Arc<dyn Scheduler>, config: MotionConfig) -> Self {
        Self::with_rng(scheduler, config, StdRng::from_entropy())
    }

    pub fn with_rng(
        scheduler: Arc<dyn Scheduler>,
        config: MotionConfig,
        rng: impl RngCore + Send + 'static,
    ) -> Self {
        let inner = ControllerInner {
            state: MotionState::default(),
            machine: MotionMachine::new(),
            range: None,
            rng: Box::new(rng),
            timer: None,
            tick: 0,
            session_id: None,
        };
        let (updates, _) = watch::channel(snapshot_of(&inner, &config));
        Self {
            shared: Arc::new(Shared {
                config,
                inner: Mutex::new(inner),
                updates,
            }),
            scheduler,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MotionSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn snapshot(&self) -> MotionSnapshot {
        self.shared.updates.borrow().clone()
    }

    pub fn state(&self) -> MotionState {
        self.shared.lock().state
    }

    pub fn phase(&self) -> MotionPhase {
        self.shared.lock().machine.phase()
    }

    /// Starts repositioning inside `bounds`. A running timer is replaced,
    /// never duplicated.
    pub fn start(&self, bounds: Bounds) -> Result<(), MotionError> {
        let range = target_range(bounds, &self.shared.config)?;
        let mut guard = self.shared.lock();
        let inner = &mut *guard;
        if let Some(timer) = inner.timer.take() {
            timer.cancel();
        }
        let outcome = inner.machine.start();
        let generation = inner.machine.generation();
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let scheduled = self.scheduler.schedule_repeating(
            self.shared.config.tick_interval(),
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.on_tick(generation);
                }
            }),
        );
        let timer = match scheduled {
            Ok(timer) => timer,
            Err(error) => {
                Shared::halt(inner);
                self.shared.publish(inner);
                return Err(error);
            }
        };
        let session_id = Uuid::new_v4();
        inner.timer = Some(timer);
        inner.range = Some(range);
        inner.state.running = true;
        inner.session_id = Some(session_id);
        tracing::info!(
            %session_id,
            ?outcome,
            width = bounds.width,
            height = bounds.height,
            "motion started"
        );
        self.shared.publish(inner);
        Ok(())
    }

    pub fn stop(&self) {
        let mut guard = self.shared.lock();
        if !Shared::halt(&mut guard) {
            return;
        }
        tracing::info!(tick = guard.tick, "motion stopped");
        self.shared.publish(&guard);
    }

    /// Toggle button: stops when running, starts otherwise. Returns whether
    /// motion is running afterwards.
    pub fn toggle(&self, bounds: Bounds) -> Result<bool, MotionError> {
        if self.phase() == MotionPhase::Running {
            self.stop();
            return Ok(false);
        }
        self.start(bounds)?;
        Ok(true)
    }

    pub fn reset(&self) {
        let mut guard = self.shared.lock();
        Shared::halt(&mut guard);
        guard.state = MotionState::default();
        guard.tick = 0;
        tracing::info!("motion reset");
        self.shared.publish(&guard);
    }

    /// Clamps into [0.1, 2.0] and returns the applied speed.
    /// Non-finite input leaves the speed unchanged.
    pub fn set_speed(&self, value: f64) -> f64 {
        let mut guard = self.shared.lock();
        let Some(speed) = clamp_speed(value) else {
            tracing::warn!(value, "ignoring non-finite speed");
            return guard.state.speed;
        };
        if speed != value {
            tracing::debug!(requested = value, applied = speed, "speed clamped");
        }
        guard.state.speed = speed;
        self.shared.publish(&guard);
        speed
    }

    pub fn step_speed(&self, step: SpeedStep) -> f64 {
        let mut guard = self.shared.lock();
        let speed = step_speed(guard.state.speed, step);
        guard.state.speed = speed;
        self.shared.publish(&guard);
        speed
    }

    /// The display area changed; later ticks use the new bounds.
    pub fn set_bounds(&self, bounds: Bounds) -> Result<(), MotionError> {
        let range = target_range(bounds, &self.shared.config)?;
        let mut guard = self.shared.lock();
        guard.range = Some(range);
        tracing::debug!(width = bounds.width, height = bounds.height, "bounds updated");
        Ok(())
    }
}
