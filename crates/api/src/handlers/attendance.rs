use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use attendance_core::{
    errors::AttendanceError,
    labels::{badge_class, display_overall_status, display_status, slot_label},
    models::{
        attendance::{
            validate_auth_number, AttendanceRecord, AutoCheckInRequest, CheckInRequest,
            CheckInResult,
        },
        slot::Slot,
    },
    resolver::{current_slot, ResolvedAttendance},
};

use crate::{
    middleware::{error_handling::AppError, session::require_user},
    ApiState,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSlotResponse {
    pub slot: Option<Slot>,
    pub label: Option<String>,
    pub time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInBody {
    pub input_number: String,
    /// Explicit slot; the backend picks one from the time when absent.
    #[serde(rename = "type", default)]
    pub slot: Option<Slot>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

/// Display text for each resolved status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusLabels {
    pub morning: String,
    pub lunch: String,
    pub dinner: String,
    pub overall: String,
}

impl From<&ResolvedAttendance> for StatusLabels {
    fn from(resolved: &ResolvedAttendance) -> Self {
        Self {
            morning: display_status(resolved.morning.as_ref()).to_string(),
            lunch: display_status(resolved.lunch.as_ref()).to_string(),
            dinner: display_status(resolved.dinner.as_ref()).to_string(),
            overall: display_status(resolved.overall.as_ref()).to_string(),
        }
    }
}

/// Badge style class for each resolved status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBadges {
    pub morning: String,
    pub lunch: String,
    pub dinner: String,
    pub overall: String,
}

impl From<&ResolvedAttendance> for StatusBadges {
    fn from(resolved: &ResolvedAttendance) -> Self {
        Self {
            morning: badge_class(resolved.morning.as_ref()).to_string(),
            lunch: badge_class(resolved.lunch.as_ref()).to_string(),
            dinner: badge_class(resolved.dinner.as_ref()).to_string(),
            overall: badge_class(resolved.overall.as_ref()).to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyAttendanceResponse {
    pub date: NaiveDate,
    pub record: AttendanceRecord,
    pub resolved: ResolvedAttendance,
    pub labels: StatusLabels,
    pub badges: StatusBadges,
}

#[axum::debug_handler]
pub async fn get_current_slot(State(state): State<Arc<ApiState>>) -> Json<CurrentSlotResponse> {
    let now = state.clock.time();
    let slot = current_slot(now);

    Json(CurrentSlotResponse {
        slot,
        label: slot.map(|s| slot_label(s).to_string()),
        time: now.format("%H:%M").to_string(),
    })
}

#[axum::debug_handler]
pub async fn check_in(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CheckInBody>,
) -> Result<Json<CheckInResult>, AppError> {
    validate_auth_number(&payload.input_number)?;
    let user = require_user(&state).await?;

    let result = match payload.slot {
        Some(slot) => {
            let request = CheckInRequest {
                member_id: user.member_id,
                course_id: state.course_id,
                slot,
                input_number: payload.input_number,
            };
            state.backend.check_in(&request).await?
        }
        None => {
            let request = AutoCheckInRequest {
                member_id: user.member_id,
                course_id: state.course_id,
                input_number: payload.input_number,
            };
            state.backend.check_in_auto(&request).await?
        }
    };

    info!(
        "Check-in for {} ({}): {}",
        user.login_id,
        payload.slot.map_or("auto", |s| s.as_str()),
        if result.success { "accepted" } else { "rejected" }
    );
    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn my_attendance(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<MyAttendanceResponse>, AppError> {
    let user = require_user(&state).await?;
    let at = state.clock.now();
    let date = query.date.unwrap_or(at.date());

    let record = match state
        .backend
        .my_attendance(user.member_id, state.course_id, date)
        .await
    {
        Ok(record) => record,
        // No row yet for the day: every slot is unrecorded.
        Err(AttendanceError::NotFound(_)) => AttendanceRecord::default(),
        Err(e) => return Err(e.into()),
    };

    let resolved = state.resolver.resolve_record(&record, date, at);
    let labels = StatusLabels {
        overall: display_overall_status(resolved.overall.as_ref()).to_string(),
        ..StatusLabels::from(&resolved)
    };
    Ok(Json(MyAttendanceResponse {
        date,
        labels,
        badges: StatusBadges::from(&resolved),
        record,
        resolved,
    }))
}
