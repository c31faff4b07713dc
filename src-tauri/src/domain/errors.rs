use crate::domain::models::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("display area {width}x{height} leaves no room to move the icon")]
    DegenerateBounds { width: f64, height: f64 },
    #[error("failed to decode icon image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("media picker failed: {0}")]
    PickerFailed(String),
    #[error("no timer runtime available: {0}")]
    SchedulerUnavailable(String),
    #[error("invalid config {path}: {message}")]
    Config { path: String, message: String },
}

impl MotionError {
    pub fn code(&self) -> &'static str {
        match self {
            MotionError::DegenerateBounds { .. } => "DEGENERATE_BOUNDS",
            MotionError::ImageDecode(_) => "ICON_DECODE_FAIL",
            MotionError::PickerFailed(_) => "ICON_PICK_FAIL",
            MotionError::SchedulerUnavailable(_) => "SCHEDULER_UNAVAILABLE",
            MotionError::Config { .. } => "CONFIG_INVALID",
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            MotionError::DegenerateBounds { .. } => {
                Some("enlarge the window to at least 100x300".to_string())
            }
            MotionError::ImageDecode(_) => Some("pick a PNG, JPEG, GIF or WebP image".to_string()),
            MotionError::Config { .. } => {
                Some("fix or remove the file named by CAT_ENTERTAINER_CONFIG".to_string())
            }
            MotionError::PickerFailed(_) | MotionError::SchedulerUnavailable(_) => None,
        }
    }
}

impl From<MotionError> for AppError {
    fn from(error: MotionError) -> Self {
        let suggestion = error.suggestion();
        AppError::new(error.code(), error.to_string(), suggestion)
    }
}
