use crate::domain::errors::MotionError;
use crate::domain::models::{IconHandle, IconSource};
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub fn decode_icon(bytes: &[u8]) -> Result<IconHandle, MotionError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    Ok(IconHandle {
        width: decoded.width(),
        height: decoded.height(),
        pixels: Arc::new(decoded),
    })
}

/// The icon currently shown: the ball until a picked image decodes.
#[derive(Debug, Default)]
pub struct IconStore {
    current: Mutex<IconSource>,
}

impl IconStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> IconSource {
        self.lock().clone()
    }

    pub fn reset_to_ball(&self) {
        *self.lock() = IconSource::Ball;
    }

    /// Waits for the picker, decodes its bytes and swaps the icon in. A
    /// failure is logged and the previous icon stays.
    pub async fn load_icon<F, E>(&self, pick: F) -> Result<IconHandle, MotionError>
    where
        F: Future<Output = Result<Vec<u8>, E>>,
        E: Display,
    {
        let loaded = match pick.await {
            Ok(bytes) => decode_icon(&bytes),
            Err(error) => Err(MotionError::PickerFailed(error.to_string())),
        };
        match loaded {
            Ok(handle) => {
                tracing::info!(
                    width = handle.width,
                    height = handle.height,
                    "icon replaced"
                );
                *self.lock() = IconSource::Image(handle.clone());
                Ok(handle)
            }
            Err(error) => {
                tracing::warn!("failed to load icon, keeping current one: {error}");
                Err(error)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, IconSource> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
