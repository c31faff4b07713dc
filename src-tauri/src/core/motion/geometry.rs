use crate::domain::errors::MotionError;
use crate::domain::models::{Bounds, Position, SpeedStep, MAX_SPEED, MIN_SPEED, SPEED_STEP};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotionConfig {
    pub tick_interval_ms: u64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub base_transition_secs: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            margin_x: 50.0,
            margin_y: 150.0,
            base_transition_secs: 2.0,
        }
    }
}

impl MotionConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms == 0 {
            return Err("tickIntervalMs must be positive".to_string());
        }
        if !(self.margin_x >= 0.0 && self.margin_y >= 0.0) {
            return Err("margins must be non-negative".to_string());
        }
        if !(self.base_transition_secs > 0.0 && self.base_transition_secs.is_finite()) {
            return Err("baseTransitionSecs must be positive".to_string());
        }
        Ok(())
    }
}

/// Inclusive area a tick may pick its next position from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRange {
    pub lower_x: f64,
    pub upper_x: f64,
    pub lower_y: f64,
    pub upper_y: f64,
}

impl TargetRange {
    pub fn contains(&self, position: Position) -> bool {
        (self.lower_x..=self.upper_x).contains(&position.x)
            && (self.lower_y..=self.upper_y).contains(&position.y)
    }
}

pub fn target_range(bounds: Bounds, cfg: &MotionConfig) -> Result<TargetRange, MotionError> {
    let degenerate = || MotionError::DegenerateBounds {
        width: bounds.width,
        height: bounds.height,
    };
    if !bounds.width.is_finite() || !bounds.height.is_finite() {
        return Err(degenerate());
    }
    let range = TargetRange {
        lower_x: -bounds.width / 2.0 + cfg.margin_x,
        upper_x: bounds.width / 2.0 - cfg.margin_x,
        lower_y: -bounds.height / 2.0 + cfg.margin_y,
        upper_y: bounds.height / 2.0 - cfg.margin_y,
    };
    if range.upper_x < range.lower_x || range.upper_y < range.lower_y {
        return Err(degenerate());
    }
    Ok(range)
}

pub fn pick_target<R: Rng + ?Sized>(range: &TargetRange, rng: &mut R) -> Position {
    Position {
        x: rng.gen_range(range.lower_x..=range.upper_x),
        y: rng.gen_range(range.lower_y..=range.upper_y),
    }
}

/// Heading from `from` to `to` in degrees. A zero displacement has no
/// direction, so the previous heading is kept.
pub fn heading_degrees(from: Position, to: Position, previous: f64) -> f64 {
    let (dx, dy) = from.delta_to(to);
    if dx == 0.0 && dy == 0.0 {
        return previous;
    }
    dy.atan2(dx).to_degrees()
}

/// `None` for NaN or infinite input.
pub fn clamp_speed(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    Some(value.clamp(MIN_SPEED, MAX_SPEED))
}

pub fn step_speed(current: f64, step: SpeedStep) -> f64 {
    let delta = match step {
        SpeedStep::Up => SPEED_STEP,
        SpeedStep::Down => -SPEED_STEP,
    };
    let snapped = ((current + delta) / SPEED_STEP).round() * SPEED_STEP;
    snapped.clamp(MIN_SPEED, MAX_SPEED)
}

pub fn transition_secs(speed: f64, cfg: &MotionConfig) -> f64 {
    cfg.base_transition_secs / speed
}

pub fn toggle_label(running: bool) -> &'static str {
    if running {
        "Stop Ball"
    } else {
        "Move Ball"
    }
}

pub fn speed_label(speed: f64) -> String {
    format!("Speed of Ball: {speed:.1}")
}
