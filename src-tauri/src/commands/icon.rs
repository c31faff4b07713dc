use crate::domain::models::{AppError, IconSource, IconSummary};
use crate::state::RuntimeState;
use tauri::State;

#[tauri::command]
pub async fn select_icon(
    state: State<'_, RuntimeState>,
    bytes: Vec<u8>,
) -> Result<IconSummary, AppError> {
    let handle = state
        .icons
        .load_icon(async move { Ok::<_, String>(bytes) })
        .await?;
    Ok(IconSummary::from(&IconSource::Image(handle)))
}

#[tauri::command]
pub async fn reset_icon(state: State<'_, RuntimeState>) -> Result<IconSummary, AppError> {
    state.icons.reset_to_ball();
    Ok(IconSummary::from(&state.icons.current()))
}

#[tauri::command]
pub async fn current_icon(state: State<'_, RuntimeState>) -> Result<IconSummary, AppError> {
    Ok(IconSummary::from(&state.icons.current()))
}
