use crate::error::AppError;
use crate::poller::{PollResult, PollerState, SessionInfo};
use crate::state::AppState;
use tauri::State;

// Rejections come back as messages, so these commands only fail if the
// host itself cannot reach the state.

/// Start polling `url` every `duration_seconds` seconds.
/// Each result is also pushed to the frontend as a "pollResult" event.
#[tauri::command]
pub async fn start_polling(
    url: String,
    duration_seconds: i64,
    state: State<'_, AppState>,
) -> Result<String, AppError> {
    Ok(state.poller.start_polling(&url, duration_seconds))
}

/// Stop the current session
#[tauri::command]
pub async fn stop_polling(state: State<'_, AppState>) -> Result<String, AppError> {
    Ok(state.poller.stop_polling())
}

#[tauri::command]
pub async fn get_results(state: State<'_, AppState>) -> Result<Vec<PollResult>, AppError> {
    Ok(state.poller.results())
}

#[tauri::command]
pub async fn get_state(state: State<'_, AppState>) -> Result<PollerState, AppError> {
    Ok(state.poller.state())
}

#[tauri::command]
pub async fn get_session(state: State<'_, AppState>) -> Result<Option<SessionInfo>, AppError> {
    Ok(state.poller.session())
}
