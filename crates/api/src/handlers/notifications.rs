use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use attendance_core::{errors::AttendanceError, models::notification::Notification};
use attendance_store::models::{LocalNotification, NewNotification};

use crate::{
    middleware::{error_handling::AppError, session::require_user},
    ApiState,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalNotificationList {
    pub notifications: Vec<LocalNotification>,
    pub unread_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbox {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

fn not_found(id: Uuid) -> AppError {
    AppError(AttendanceError::NotFound(format!(
        "Notification {} not found",
        id
    )))
}

// Local notifications

#[axum::debug_handler]
pub async fn list_notifications(State(state): State<Arc<ApiState>>) -> Json<LocalNotificationList> {
    let store = state.store.lock().await;
    let log = store.notifications();
    Json(LocalNotificationList {
        notifications: log.list(),
        unread_count: log.unread_count(),
    })
}

#[axum::debug_handler]
pub async fn add_notification(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewNotification>,
) -> Result<(StatusCode, Json<LocalNotification>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError(AttendanceError::Validation(
            "A notification needs a title".to_string(),
        )));
    }

    let mut store = state.store.lock().await;
    let notification = store.add_notification(payload);
    store.flush().await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

#[axum::debug_handler]
pub async fn mark_read(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    if !store.mark_notification_read(id) {
        return Err(not_found(id));
    }
    store.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn mark_all_read(State(state): State<Arc<ApiState>>) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    store.mark_all_notifications_read();
    store.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn remove_notification(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    if !store.remove_notification(id) {
        return Err(not_found(id));
    }
    store.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn clear_notifications(
    State(state): State<Arc<ApiState>>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    store.clear_notifications();
    store.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}

// Backend notifications

/// The latest unread list published by the poller.
#[axum::debug_handler]
pub async fn inbox(State(state): State<Arc<ApiState>>) -> Result<Json<Inbox>, AppError> {
    require_user(&state).await?;

    let notifications = state.unread.borrow().clone();
    Ok(Json(Inbox {
        unread_count: notifications.len(),
        notifications,
    }))
}

/// Every backend notification for the signed-in member, read or not.
#[axum::debug_handler]
pub async fn inbox_history(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Notification>>, AppError> {
    require_user(&state).await?;
    Ok(Json(state.backend.my_notifications().await?))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub count: u64,
}

/// Asks the backend directly rather than trusting the last poll.
#[axum::debug_handler]
pub async fn inbox_unread_count(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<UnreadCountResponse>, AppError> {
    require_user(&state).await?;
    let count = state.backend.unread_count().await?;
    Ok(Json(UnreadCountResponse { count }))
}

#[axum::debug_handler]
pub async fn mark_inbox_read(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_user(&state).await?;
    state.backend.mark_notification_read(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn mark_inbox_all_read(
    State(state): State<Arc<ApiState>>,
) -> Result<StatusCode, AppError> {
    require_user(&state).await?;
    state.backend.mark_all_notifications_read().await?;
    Ok(StatusCode::NO_CONTENT)
}
