//! # Session Guards
//!
//! The console holds a single signed-in session in its local store. Handlers that
//! act on behalf of a user fetch it through these guards instead of reading the
//! store directly.

use attendance_core::{errors::AttendanceError, models::auth::SessionUser};

use crate::{middleware::error_handling::AppError, ApiState};

/// The signed-in user, or an authentication error.
pub async fn require_user(state: &ApiState) -> Result<SessionUser, AppError> {
    let store = state.store.lock().await;
    store
        .current_user()
        .cloned()
        .ok_or_else(|| AppError(AttendanceError::Authentication("Not signed in".to_string())))
}

/// The signed-in user if they are an administrator.
pub async fn require_admin(state: &ApiState) -> Result<SessionUser, AppError> {
    let user = require_user(state).await?;
    if !user.is_admin() {
        return Err(AppError(AttendanceError::Authorization(
            "Administrator access required".to_string(),
        )));
    }
    Ok(user)
}
