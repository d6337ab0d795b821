//! Tauri command handlers for the editing session.

use tauri::{AppHandle, Emitter, State};
use tracing::{debug, warn};
use crate::core::{AppState, DepthSettings, ImageAsset, LightSettings, Operation, SessionSnapshot};
use crate::utils::{EditorResult, extract_filename, read_image_file};

/// Event carrying a fresh [`SessionSnapshot`] after every transition.
pub const SESSION_CHANGED_EVENT: &str = "session-changed";

fn publish(app: &AppHandle, snapshot: &SessionSnapshot) {
    if let Err(e) = app.emit(SESSION_CHANGED_EVENT, snapshot) {
        warn!("Failed to emit {}: {}", SESSION_CHANGED_EVENT, e);
    }
}

/// Returns the current session without changing it.
#[tauri::command]
pub async fn get_session(state: State<'_, AppState>) -> EditorResult<SessionSnapshot> {
    state.snapshot()
}

/// Sets the original image from a browser file read.
///
/// # Arguments
/// * `mime_type` - The file's declared content type; must be `image/*`
/// * `data` - Data URI or bare base64 payload
///
/// A non-image file is rejected with a validation error and the session is untouched.
#[tauri::command]
pub async fn upload_image(
    app: AppHandle,
    state: State<'_, AppState>,
    mime_type: String,
    data: String,
) -> EditorResult<SessionSnapshot> {
    let image = ImageAsset::from_encoded_upload(&mime_type, &data)?;
    let snapshot = state.upload(image)?;
    publish(&app, &snapshot);
    Ok(snapshot)
}

/// Sets the original image from a path picked with the native dialog.
#[tauri::command]
pub async fn open_image(
    app: AppHandle,
    state: State<'_, AppState>,
    path: String,
) -> EditorResult<SessionSnapshot> {
    debug!("Opening {}", extract_filename(&path));
    let image = read_image_file(&path).await?;
    let snapshot = state.upload(image)?;
    publish(&app, &snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub async fn set_depth_settings(
    app: AppHandle,
    state: State<'_, AppState>,
    settings: DepthSettings,
) -> EditorResult<SessionSnapshot> {
    let snapshot = state.set_depth_settings(settings)?;
    publish(&app, &snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub async fn set_light_settings(
    app: AppHandle,
    state: State<'_, AppState>,
    settings: LightSettings,
) -> EditorResult<SessionSnapshot> {
    let snapshot = state.set_light_settings(settings)?;
    publish(&app, &snapshot);
    Ok(snapshot)
}

/// Generates a depth map for the original image.
///
/// Emits the busy snapshot as soon as the request is dispatched and the
/// settled snapshot when it completes. A no-op when no image is loaded or
/// another generation is in flight.
#[tauri::command]
pub async fn request_depth(
    app: AppHandle,
    state: State<'_, AppState>,
) -> EditorResult<SessionSnapshot> {
    let snapshot = state
        .request(Operation::GeneratingDepth, |started| publish(&app, started))
        .await?;
    publish(&app, &snapshot);
    Ok(snapshot)
}

/// Re-lights the original image, using the depth map when one exists.
#[tauri::command]
pub async fn request_light(
    app: AppHandle,
    state: State<'_, AppState>,
) -> EditorResult<SessionSnapshot> {
    let snapshot = state
        .request(Operation::ApplyingLight, |started| publish(&app, started))
        .await?;
    publish(&app, &snapshot);
    Ok(snapshot)
}

/// Discards all images and restores default settings.
#[tauri::command]
pub async fn reset_session(
    app: AppHandle,
    state: State<'_, AppState>,
) -> EditorResult<SessionSnapshot> {
    let snapshot = state.reset()?;
    publish(&app, &snapshot);
    Ok(snapshot)
}
