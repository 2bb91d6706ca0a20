use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use attendance_core::{
    errors::AttendanceError,
    models::member::{CreateMemberRequest, Member, UpdateMemberRequest},
};

use crate::{
    middleware::{
        error_handling::AppError,
        session::{require_admin, require_user},
    },
    ApiState,
};

#[axum::debug_handler]
pub async fn list_members(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Member>>, AppError> {
    require_admin(&state).await?;
    Ok(Json(state.backend.members().await?))
}

#[axum::debug_handler]
pub async fn get_member(
    State(state): State<Arc<ApiState>>,
    Path(login_id): Path<String>,
) -> Result<Json<Member>, AppError> {
    require_admin(&state).await?;
    Ok(Json(state.backend.member(&login_id).await?))
}

#[axum::debug_handler]
pub async fn create_member(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    require_admin(&state).await?;

    if payload.login_id.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError(AttendanceError::Validation(
            "Login ID and password are required".to_string(),
        )));
    }

    let member = state.backend.create_member(&payload).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[axum::debug_handler]
pub async fn update_member(
    State(state): State<Arc<ApiState>>,
    Path(login_id): Path<String>,
    Json(payload): Json<UpdateMemberRequest>,
) -> Result<Json<Member>, AppError> {
    require_admin(&state).await?;
    Ok(Json(state.backend.update_member(&login_id, &payload).await?))
}

#[axum::debug_handler]
pub async fn delete_member(
    State(state): State<Arc<ApiState>>,
    Path(login_id): Path<String>,
) -> Result<StatusCode, AppError> {
    require_admin(&state).await?;
    state.backend.delete_member(&login_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Own profile

#[axum::debug_handler]
pub async fn my_profile(State(state): State<Arc<ApiState>>) -> Result<Json<Member>, AppError> {
    require_user(&state).await?;
    Ok(Json(state.backend.my_info().await?))
}

/// Updates the signed-in member's own profile. Role changes are admin-only and dropped.
#[axum::debug_handler]
pub async fn update_my_profile(
    State(state): State<Arc<ApiState>>,
    Json(mut payload): Json<UpdateMemberRequest>,
) -> Result<Json<Member>, AppError> {
    require_user(&state).await?;
    payload.role = None;
    Ok(Json(state.backend.update_my_info(&payload).await?))
}
