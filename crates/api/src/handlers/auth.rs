use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, warn};

use attendance_core::models::auth::{LoginRequest, SessionUser};

use crate::{
    middleware::{error_handling::AppError, session::require_user},
    ApiState,
};

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionUser>, AppError> {
    let response = state
        .backend
        .login(&payload.login_id, &payload.password)
        .await?;
    state
        .backend
        .set_access_token(Some(response.access_token.clone()));

    let mut store = state.store.lock().await;
    let user = store.save_session(&payload.login_id, response).user.clone();
    store.flush().await?;

    info!("{} signed in", user.login_id);
    Ok(Json(user))
}

#[axum::debug_handler]
pub async fn logout(State(state): State<Arc<ApiState>>) -> Result<StatusCode, AppError> {
    // The local session is dropped even if the backend refuses the call.
    if let Err(e) = state.backend.logout().await {
        warn!("Backend logout failed: {}", e);
    }
    state.backend.set_access_token(None);

    let mut store = state.store.lock().await;
    store.clear_session();
    store.flush().await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn me(State(state): State<Arc<ApiState>>) -> Result<Json<SessionUser>, AppError> {
    Ok(Json(require_user(&state).await?))
}
