use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_SPEED: f64 = 1.0;
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 2.0;
pub const SPEED_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn delta_to(self, next: Position) -> (f64, f64) {
        (next.x - self.x, next.y - self.y)
    }
}

/// Size of the visible display area the icon wanders in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionState {
    pub position: Position,
    pub speed: f64,
    pub angle: f64,
    pub running: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            position: Position::ORIGIN,
            speed: DEFAULT_SPEED,
            angle: 0.0,
            running: false,
        }
    }
}

/// What the presentation layer observes after every change. `tick` counts
/// repositionings since the last reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionSnapshot {
    pub state: MotionState,
    pub transition_secs: f64,
    pub tick: u64,
    pub session_id: Option<Uuid>,
    pub toggle_label: String,
    pub speed_label: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedStep {
    Up,
    Down,
}

#[derive(Clone)]
pub struct IconHandle {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<image::RgbaImage>,
}

impl fmt::Debug for IconHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconHandle")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub enum IconSource {
    #[default]
    Ball,
    Image(IconHandle),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSummary {
    pub kind: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl From<&IconSource> for IconSummary {
    fn from(source: &IconSource) -> Self {
        match source {
            IconSource::Ball => Self {
                kind: "ball".to_string(),
                width: None,
                height: None,
            },
            IconSource::Image(handle) => Self {
                kind: "image".to_string(),
                width: Some(handle.width),
                height: Some(handle.height),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl AppError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IconSource, IconSummary, MotionState, Position};

    #[test]
    fn default_state_sits_idle_at_origin() {
        let state = MotionState::default();
        assert_eq!(state.position, Position::ORIGIN);
        assert_eq!(state.speed, 1.0);
        assert_eq!(state.angle, 0.0);
        assert!(!state.running);
    }

    #[test]
    fn state_serializes_in_camel_case() {
        let raw = serde_json::to_value(MotionState::default()).unwrap();
        assert_eq!(raw["position"]["x"], 0.0);
        assert_eq!(raw["running"], false);
    }

    #[test]
    fn ball_summary_has_no_dimensions() {
        let summary = IconSummary::from(&IconSource::Ball);
        assert_eq!(summary.kind, "ball");
        assert!(summary.width.is_none());
    }
}
