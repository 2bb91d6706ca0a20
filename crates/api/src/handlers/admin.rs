use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use attendance_core::{
    errors::AttendanceError,
    labels::UNNAMED_MEMBER,
    models::attendance::{AttendanceRecord, ExportFormat, UpdateAttendanceStatusRequest},
    resolver::ResolvedAttendance,
};

use crate::{
    handlers::attendance::{StatusBadges, StatusLabels},
    middleware::{error_handling::AppError, session::require_admin},
    ApiState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardQuery {
    pub date: Option<NaiveDate>,
    pub course_id: Option<i64>,
}

/// One enrolled member's day on the admin board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRow {
    pub member_id: i64,
    pub member_name: String,
    /// Target for `PATCH /api/admin/attendances/:id`. Falls back to the member id when
    /// the backend answered without a row id, and is absent when the lookup failed.
    pub daily_attendance_id: Option<i64>,
    pub record: AttendanceRecord,
    pub resolved: ResolvedAttendance,
    pub labels: StatusLabels,
    pub badges: StatusBadges,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceBoard {
    pub date: NaiveDate,
    pub course_id: i64,
    pub rows: Vec<BoardRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStatusQuery {
    pub date: Option<NaiveDate>,
    pub course_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub format: ExportFormat,
    pub date: Option<NaiveDate>,
    pub course_id: Option<i64>,
}

/// Resolved attendance for every enrolled member.
///
/// Member records are fetched concurrently; a member whose lookup fails is shown
/// with nothing recorded rather than failing the whole board.
#[axum::debug_handler]
pub async fn attendance_board(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<AttendanceBoard>, AppError> {
    require_admin(&state).await?;

    let at = state.clock.now();
    let date = query.date.unwrap_or(at.date());
    let course_id = query.course_id.unwrap_or(state.course_id);

    let enrollments = state.backend.enrollments(course_id).await?;
    debug!("Building board for {} members on {}", enrollments.len(), date);

    let mut lookups = JoinSet::new();
    for (index, enrollment) in enrollments.iter().enumerate() {
        let Some(member_id) = enrollment.member_id() else {
            warn!("Skipping enrollment without a member id");
            continue;
        };
        let backend = Arc::clone(&state.backend);
        lookups.spawn(async move {
            let record = backend.my_attendance(member_id, course_id, date).await;
            (index, member_id, record)
        });
    }

    let mut records: Vec<Option<(AttendanceRecord, Option<i64>)>> = vec![None; enrollments.len()];
    while let Some(joined) = lookups.join_next().await {
        let (index, member_id, result) =
            joined.map_err(|e| AttendanceError::Internal(Box::new(e)))?;
        records[index] = Some(match result {
            Ok(record) => {
                let row_id = record.daily_attendance_id.or(Some(member_id));
                (record, row_id)
            }
            Err(e) => {
                warn!("Attendance lookup for member {} failed: {}", member_id, e);
                (AttendanceRecord::default(), None)
            }
        });
    }

    let rows = enrollments
        .iter()
        .zip(records)
        .filter_map(|(enrollment, looked_up)| {
            let member_id = enrollment.member_id()?;
            let (record, daily_attendance_id) = looked_up.unwrap_or_default();
            let resolved = state.resolver.resolve_record(&record, date, at);
            Some(BoardRow {
                member_id,
                daily_attendance_id,
                member_name: enrollment
                    .member_name()
                    .unwrap_or(UNNAMED_MEMBER)
                    .to_string(),
                labels: StatusLabels::from(&resolved),
                badges: StatusBadges::from(&resolved),
                record,
                resolved,
            })
        })
        .collect();

    Ok(Json(AttendanceBoard {
        date,
        course_id,
        rows,
    }))
}

/// Cycles the status of an existing daily attendance row.
#[axum::debug_handler]
pub async fn change_attendance_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_admin(&state).await?;
    state.backend.change_attendance_status(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn change_member_attendance_status(
    State(state): State<Arc<ApiState>>,
    Path(member_id): Path<i64>,
    Query(query): Query<MemberStatusQuery>,
) -> Result<StatusCode, AppError> {
    require_admin(&state).await?;

    let date = query.date.unwrap_or(state.clock.today());
    let course_id = query.course_id.unwrap_or(state.course_id);
    state
        .backend
        .change_attendance_status_by_member(member_id, course_id, date)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn update_attendance_status(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpdateAttendanceStatusRequest>,
) -> Result<StatusCode, AppError> {
    require_admin(&state).await?;
    state.backend.update_attendance_status(&payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn export_attendance(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state).await?;

    let date = query.date.unwrap_or(state.clock.today());
    let course_id = query.course_id.unwrap_or(state.course_id);
    let file = state
        .backend
        .export_attendance(query.format, date, course_id)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, file.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        ),
    ];
    Ok((headers, file.bytes))
}
