use crate::domain::models::{AppError, Bounds, MotionSnapshot, SpeedStep};
use crate::state::RuntimeState;
use tauri::State;

pub const MOTION_EVENT: &str = "motion/state";

#[tauri::command]
pub async fn start_motion(
    state: State<'_, RuntimeState>,
    width: f64,
    height: f64,
) -> Result<MotionSnapshot, AppError> {
    state.controller.start(Bounds::new(width, height))?;
    Ok(state.controller.snapshot())
}

#[tauri::command]
pub async fn stop_motion(state: State<'_, RuntimeState>) -> Result<MotionSnapshot, AppError> {
    state.controller.stop();
    Ok(state.controller.snapshot())
}

#[tauri::command]
pub async fn toggle_motion(
    state: State<'_, RuntimeState>,
    width: f64,
    height: f64,
) -> Result<MotionSnapshot, AppError> {
    state.controller.toggle(Bounds::new(width, height))?;
    Ok(state.controller.snapshot())
}

#[tauri::command]
pub async fn resize_motion_area(
    state: State<'_, RuntimeState>,
    width: f64,
    height: f64,
) -> Result<(), AppError> {
    state.controller.set_bounds(Bounds::new(width, height))?;
    Ok(())
}

#[tauri::command]
pub async fn reset_motion(state: State<'_, RuntimeState>) -> Result<MotionSnapshot, AppError> {
    state.controller.reset();
    Ok(state.controller.snapshot())
}

#[tauri::command]
pub async fn set_motion_speed(
    state: State<'_, RuntimeState>,
    value: f64,
) -> Result<MotionSnapshot, AppError> {
    state.controller.set_speed(value);
    Ok(state.controller.snapshot())
}

#[tauri::command]
pub async fn step_motion_speed(
    state: State<'_, RuntimeState>,
    direction: SpeedStep,
) -> Result<MotionSnapshot, AppError> {
    state.controller.step_speed(direction);
    Ok(state.controller.snapshot())
}

#[tauri::command]
pub async fn get_motion_state(state: State<'_, RuntimeState>) -> Result<MotionSnapshot, AppError> {
    Ok(state.controller.snapshot())
}
