use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use attendance_core::models::{
    attendance::validate_auth_number,
    attendance_config::{
        AttendanceConfig, CreateAttendanceConfigRequest, UpdateAttendanceConfigRequest,
        UpdateAuthNumberRequest,
    },
    slot::{clock_time, Slot, SlotWindow},
};

use crate::{
    middleware::{error_handling::AppError, session::require_admin},
    ApiState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigQuery {
    pub date: Option<NaiveDate>,
    pub course_id: Option<i64>,
}

/// Body of a new configuration. Omitted times fall back to the slot's default window.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfigBody {
    pub course_id: Option<i64>,
    pub target_date: NaiveDate,
    #[serde(rename = "type")]
    pub slot: Slot,
    pub auth_number: String,
    #[serde(default, with = "clock_time::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "clock_time::option")]
    pub standard_time: Option<NaiveTime>,
    #[serde(default, with = "clock_time::option")]
    pub deadline: Option<NaiveTime>,
}

impl CreateConfigBody {
    fn window(&self) -> SlotWindow {
        let defaults = SlotWindow::default_for(self.slot);
        SlotWindow::new(
            self.start_time.unwrap_or(defaults.start),
            self.standard_time.unwrap_or(defaults.standard),
            self.deadline.unwrap_or(defaults.deadline),
        )
    }
}

/// Newest target date first, then morning to dinner.
pub fn sort_configs(configs: &mut [AttendanceConfig]) {
    configs.sort_by(|a, b| {
        b.target_date
            .cmp(&a.target_date)
            .then_with(|| a.slot.cmp(&b.slot))
    });
}

#[axum::debug_handler]
pub async fn list_configs(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ConfigQuery>,
) -> Result<Json<Vec<AttendanceConfig>>, AppError> {
    require_admin(&state).await?;

    let course_id = query.course_id.unwrap_or(state.course_id);
    let mut configs = state.backend.attendance_configs(course_id).await?;
    if let Some(date) = query.date {
        configs.retain(|config| config.target_date == date);
    }
    sort_configs(&mut configs);

    Ok(Json(configs))
}

#[axum::debug_handler]
pub async fn get_config(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<AttendanceConfig>, AppError> {
    require_admin(&state).await?;
    Ok(Json(state.backend.attendance_config(id).await?))
}

#[axum::debug_handler]
pub async fn create_config(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateConfigBody>,
) -> Result<(StatusCode, Json<AttendanceConfig>), AppError> {
    require_admin(&state).await?;

    let request = CreateAttendanceConfigRequest::new(
        payload.course_id.unwrap_or(state.course_id),
        payload.target_date,
        payload.slot,
        payload.auth_number.clone(),
        payload.window(),
    )?;
    let config = state.backend.create_attendance_config(&request).await?;

    info!(
        "Created {} configuration for {}",
        config.slot, config.target_date
    );
    Ok((StatusCode::CREATED, Json(config)))
}

#[axum::debug_handler]
pub async fn update_config(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAttendanceConfigRequest>,
) -> Result<Json<AttendanceConfig>, AppError> {
    require_admin(&state).await?;
    payload.validate()?;
    Ok(Json(state.backend.update_attendance_config(id, &payload).await?))
}

#[axum::debug_handler]
pub async fn update_auth_number(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAuthNumberRequest>,
) -> Result<Json<AttendanceConfig>, AppError> {
    require_admin(&state).await?;
    validate_auth_number(&payload.auth_number)?;
    Ok(Json(
        state
            .backend
            .update_auth_number(id, &payload.auth_number)
            .await?,
    ))
}

#[axum::debug_handler]
pub async fn delete_config(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_admin(&state).await?;
    state.backend.delete_attendance_config(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
