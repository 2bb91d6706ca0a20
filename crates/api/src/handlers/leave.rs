use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use attendance_core::{
    errors::AttendanceError,
    models::leave::{sort_newest_first, CreateLeaveRequest, LeaveFilter, LeaveRequest},
};

use crate::{
    middleware::{
        error_handling::AppError,
        session::{require_admin, require_user},
    },
    ApiState,
};

#[derive(Debug, Default, Deserialize)]
pub struct LeaveQuery {
    #[serde(default)]
    pub status: LeaveFilter,
}

#[derive(Debug, Deserialize)]
pub struct RejectBody {
    #[serde(default)]
    pub reason: String,
}

// Student

#[axum::debug_handler]
pub async fn my_leave_requests(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<LeaveRequest>>, AppError> {
    let user = require_user(&state).await?;

    let mut requests = state.backend.my_leave_requests(&user.login_id).await?;
    sort_newest_first(&mut requests);
    Ok(Json(requests))
}

/// Files a leave request without evidence. Attachments go through the CLI.
#[axum::debug_handler]
pub async fn create_leave_request(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateLeaveRequest>,
) -> Result<(StatusCode, Json<LeaveRequest>), AppError> {
    payload.validate()?;
    let user = require_user(&state).await?;

    let request = state
        .backend
        .create_leave_request(&user.login_id, &payload, None)
        .await?;

    info!("{} requested leave for {}", user.login_id, payload.leave_date);
    Ok((StatusCode::CREATED, Json(request)))
}

#[axum::debug_handler]
pub async fn cancel_leave_request(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let user = require_user(&state).await?;
    state
        .backend
        .cancel_leave_request(id, &user.login_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// Admin

#[axum::debug_handler]
pub async fn list_leave_requests(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LeaveQuery>,
) -> Result<Json<Vec<LeaveRequest>>, AppError> {
    require_admin(&state).await?;

    let mut requests = match query.status {
        LeaveFilter::Pending => state.backend.pending_leave_requests().await?,
        _ => state.backend.all_leave_requests().await?,
    };
    requests.retain(|request| query.status.matches(request));
    sort_newest_first(&mut requests);

    Ok(Json(requests))
}

#[axum::debug_handler]
pub async fn approve_leave_request(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let admin = require_admin(&state).await?;
    state.backend.approve_leave_request(id).await?;

    info!("{} approved leave request {}", admin.login_id, id);
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn reject_leave_request(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<RejectBody>,
) -> Result<StatusCode, AppError> {
    let admin = require_admin(&state).await?;

    let reason = payload.reason.trim();
    if reason.is_empty() {
        return Err(AppError(AttendanceError::Validation(
            "A reason is required to reject a leave request".to_string(),
        )));
    }
    state.backend.reject_leave_request(id, reason).await?;

    info!("{} rejected leave request {}", admin.login_id, id);
    Ok(StatusCode::NO_CONTENT)
}
