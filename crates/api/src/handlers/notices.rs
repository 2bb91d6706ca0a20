use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use attendance_core::{
    errors::AttendanceError,
    models::notice::{Notice, NoticePage, NoticeRequest},
};

use crate::{
    middleware::{error_handling::AppError, session::require_admin},
    ApiState,
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[axum::debug_handler]
pub async fn list_notices(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<NoticeQuery>,
) -> Result<Json<NoticePage>, AppError> {
    let page = query.page.unwrap_or(0);
    let size = query.size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE);
    Ok(Json(state.backend.notices(page, size).await?))
}

#[axum::debug_handler]
pub async fn get_notice(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Notice>, AppError> {
    Ok(Json(state.backend.notice(id).await?))
}

/// Popup notices, or none once they have been dismissed for today.
#[axum::debug_handler]
pub async fn popup_notices(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Notice>>, AppError> {
    let today = state.clock.today();
    if !state.store.lock().await.should_show_popups(today) {
        debug!("Popup notices dismissed for {}", today);
        return Ok(Json(Vec::new()));
    }

    Ok(Json(state.backend.popup_notices().await?))
}

#[axum::debug_handler]
pub async fn dismiss_popups(State(state): State<Arc<ApiState>>) -> Result<StatusCode, AppError> {
    let today = state.clock.today();

    let mut store = state.store.lock().await;
    store.dismiss_popups_for(today);
    store.flush().await?;

    Ok(StatusCode::NO_CONTENT)
}

// Admin

fn validate_notice(request: &NoticeRequest) -> Result<(), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError(AttendanceError::Validation(
            "A notice needs a title".to_string(),
        )));
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn create_notice(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NoticeRequest>,
) -> Result<(StatusCode, Json<Notice>), AppError> {
    require_admin(&state).await?;
    validate_notice(&payload)?;
    let notice = state.backend.create_notice(&payload).await?;
    Ok((StatusCode::CREATED, Json(notice)))
}

#[axum::debug_handler]
pub async fn update_notice(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<NoticeRequest>,
) -> Result<Json<Notice>, AppError> {
    require_admin(&state).await?;
    validate_notice(&payload)?;
    Ok(Json(state.backend.update_notice(id, &payload).await?))
}

#[axum::debug_handler]
pub async fn delete_notice(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_admin(&state).await?;
    state.backend.delete_notice(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
