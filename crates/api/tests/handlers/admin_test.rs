use attendance_api::handlers::admin::AttendanceBoard;
use attendance_core::{
    errors::AttendanceError,
    models::{
        attendance::{
            AttendanceRecord, AttendanceStatus, Enrollment, ExportFile, ExportFormat,
        },
        member::{Member, Role},
    },
};
use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{today, TestContext, COURSE_ID};

fn enrollment(id: i64, name: &str) -> Enrollment {
    Enrollment {
        member: Some(Member {
            id,
            login_id: format!("student{:02}", id),
            name: name.to_string(),
            address: None,
            phone_number: None,
            role: Role::Student,
        }),
        member_id: None,
        member_name: None,
        course: None,
    }
}

#[tokio::test]
async fn test_board_requires_admin() {
    let server = TestContext::new().student().server();

    server
        .get("/api/admin/attendance-board")
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn test_board_resolves_every_enrolled_member() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_enrollments()
        .withf(|course_id| *course_id == COURSE_ID)
        .returning(|_| {
            Ok(vec![
                enrollment(11, "Kim"),
                Enrollment {
                    member: None,
                    member_id: Some(12),
                    member_name: None,
                    course: None,
                },
                enrollment(13, "Park"),
            ])
        });
    ctx.backend
        .expect_my_attendance()
        .returning(|member_id, _, _| match member_id {
            11 => Ok(AttendanceRecord {
                daily_attendance_id: Some(501),
                member_id: Some(11),
                morning_status: Some(AttendanceStatus::Present),
                ..AttendanceRecord::default()
            }),
            12 => Ok(AttendanceRecord::default()),
            _ => Err(AttendanceError::Backend(eyre::eyre!("lookup failed"))),
        });
    let server = ctx.server();

    let board: AttendanceBoard = server.get("/api/admin/attendance-board").await.json();

    assert_eq!(board.date, today());
    assert_eq!(board.course_id, COURSE_ID);
    let ids: Vec<i64> = board.rows.iter().map(|row| row.member_id).collect();
    assert_eq!(ids, vec![11, 12, 13]);

    let kim = &board.rows[0];
    assert_eq!(kim.member_name, "Kim");
    assert_eq!(kim.daily_attendance_id, Some(501));
    assert_eq!(kim.badges.morning, "badge-success");
    assert_eq!(kim.resolved.morning, Some(AttendanceStatus::Present));
    assert_eq!(kim.resolved.lunch, None);
    assert_eq!(kim.resolved.overall, None);

    let unnamed = &board.rows[1];
    assert_eq!(unnamed.member_name, "이름 없음");
    // No row id from the backend: corrections target the member id instead.
    assert_eq!(unnamed.daily_attendance_id, Some(12));
    assert_eq!(unnamed.resolved.overall, Some(AttendanceStatus::Absent));

    // The failed lookup still gets a row, resolved as if nothing was recorded.
    let park = &board.rows[2];
    assert_eq!(park.record, AttendanceRecord::default());
    assert_eq!(park.daily_attendance_id, None);
    assert_eq!(park.resolved.morning, Some(AttendanceStatus::Absent));
    assert_eq!(park.labels.morning, "결석");
    assert_eq!(park.labels.dinner, "-");
}

#[tokio::test]
async fn test_board_fails_when_enrollments_unavailable() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_enrollments()
        .returning(|_| Err(AttendanceError::Authorization("Forbidden".to_string())));
    let server = ctx.server();

    server
        .get("/api/admin/attendance-board")
        .add_query_param("courseId", "3")
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_change_status_by_member_defaults_to_today() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_change_attendance_status_by_member()
        .withf(|member_id, course_id, date| {
            *member_id == 12 && *course_id == COURSE_ID && *date == today()
        })
        .times(1)
        .returning(|_, _, _| Ok(()));
    let server = ctx.server();

    server
        .patch("/api/admin/attendances/member/12")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_attendance_status() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_update_attendance_status()
        .withf(|request| {
            request.member_id == 11 && request.lunch_status == Some(AttendanceStatus::Excused)
        })
        .times(1)
        .returning(|_| Ok(()));
    let server = ctx.server();

    server
        .put("/api/admin/attendances/status")
        .json(&json!({
            "memberId": 11,
            "courseId": 1,
            "date": "2025-03-10",
            "lunchStatus": "OFFICIAL_LEAVE"
        }))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_export_sets_download_headers() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_export_attendance()
        .withf(|format, date, _| *format == ExportFormat::Csv && *date == today())
        .returning(|format, date, _| {
            Ok(ExportFile {
                file_name: format.file_name(date),
                content_type: format.content_type(),
                bytes: b"name,morning\nKim,PRESENT\n".to_vec(),
            })
        });
    let server = ctx.server();

    let response = server
        .get("/api/admin/attendances/export")
        .add_query_param("format", "csv")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header(header::CONTENT_TYPE), "text/csv");
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"attendance_2025-03-10.csv\""
    );
    assert_eq!(response.text(), "name,morning\nKim,PRESENT\n");
}
