use attendance_api::handlers::attendance::{CurrentSlotResponse, MyAttendanceResponse};
use attendance_core::{
    errors::AttendanceError,
    models::{
        attendance::{AttendanceRecord, AttendanceStatus, CheckInResult},
        slot::Slot,
    },
};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::test_utils::{date, today, TestContext, COURSE_ID};

#[rstest]
#[case(8, 40, Some(Slot::Morning), Some("아침"))]
#[case(12, 50, Some(Slot::Lunch), Some("점심"))]
#[case(18, 10, Some(Slot::Dinner), Some("저녁"))]
#[case(11, 0, None, None)]
#[tokio::test]
async fn test_current_slot(
    #[case] hour: u32,
    #[case] minute: u32,
    #[case] slot: Option<Slot>,
    #[case] label: Option<&str>,
) {
    let server = TestContext::new().at(hour, minute).server();

    let response: CurrentSlotResponse = server.get("/api/attendance/current-slot").await.json();
    assert_eq!(response.slot, slot);
    assert_eq!(response.label.as_deref(), label);
    assert_eq!(response.time, format!("{:02}:{:02}", hour, minute));
}

#[tokio::test]
async fn test_check_in_requires_session() {
    let server = TestContext::new().server();

    server
        .post("/api/attendance/check-in")
        .json(&json!({ "inputNumber": "1234" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("123")]
#[case("12345")]
#[case("12a4")]
#[tokio::test]
async fn test_check_in_rejects_malformed_number(#[case] input: &str) {
    let server = TestContext::new().student().server();

    server
        .post("/api/attendance/check-in")
        .json(&json!({ "inputNumber": input }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_in_auto_uses_session_member() {
    let mut ctx = TestContext::new().student();
    ctx.backend
        .expect_check_in_auto()
        .withf(|request| {
            request.member_id == 7 && request.course_id == COURSE_ID && request.input_number == "4821"
        })
        .times(1)
        .returning(|_| {
            Ok(CheckInResult {
                success: true,
                message: "출석 완료".to_string(),
                check_time: Some("08:41".to_string()),
            })
        });
    let server = ctx.server();

    let response = server
        .post("/api/attendance/check-in")
        .json(&json!({ "inputNumber": "4821" }))
        .await;
    response.assert_status_ok();

    let result: CheckInResult = response.json();
    assert!(result.success);
    assert_eq!(result.check_time.as_deref(), Some("08:41"));
}

#[tokio::test]
async fn test_check_in_with_explicit_slot() {
    let mut ctx = TestContext::new().student();
    ctx.backend
        .expect_check_in()
        .withf(|request| request.slot == Slot::Lunch && request.member_id == 7)
        .times(1)
        .returning(|_| {
            Ok(CheckInResult {
                success: false,
                message: "Wrong number".to_string(),
                check_time: None,
            })
        });
    let server = ctx.server();

    let result: CheckInResult = server
        .post("/api/attendance/check-in")
        .json(&json!({ "inputNumber": "0000", "type": "LUNCH" }))
        .await
        .json();
    assert!(!result.success);
}

#[tokio::test]
async fn test_my_attendance_without_row_resolves_missed_morning() {
    let mut ctx = TestContext::new().student();
    ctx.backend
        .expect_my_attendance()
        .withf(|member_id, course_id, day| *member_id == 7 && *course_id == COURSE_ID && *day == today())
        .returning(|_, _, _| Err(AttendanceError::NotFound("No attendance".to_string())));
    let server = ctx.server();

    let response: MyAttendanceResponse = server.get("/api/attendance/me").await.json();

    assert_eq!(response.date, today());
    assert_eq!(response.resolved.morning, Some(AttendanceStatus::Absent));
    assert_eq!(response.resolved.lunch, None);
    assert_eq!(response.resolved.dinner, None);
    assert_eq!(response.resolved.overall, Some(AttendanceStatus::Absent));
    assert_eq!(response.labels.morning, "결석");
    assert_eq!(response.labels.lunch, "-");
}

#[tokio::test]
async fn test_my_attendance_for_past_date_keeps_recorded_statuses() {
    let mut ctx = TestContext::new().student();
    ctx.backend.expect_my_attendance().returning(|_, _, _| {
        Ok(AttendanceRecord {
            morning_status: Some(AttendanceStatus::Present),
            lunch_status: Some(AttendanceStatus::Late),
            ..AttendanceRecord::default()
        })
    });
    let server = ctx.server();

    let response: MyAttendanceResponse = server
        .get("/api/attendance/me")
        .add_query_param("date", "2025-03-07")
        .await
        .json();

    assert_eq!(response.date, date(2025, 3, 7));
    assert_eq!(response.resolved.morning, Some(AttendanceStatus::Present));
    assert_eq!(response.resolved.lunch, Some(AttendanceStatus::Late));
    assert_eq!(response.resolved.dinner, Some(AttendanceStatus::Absent));
    assert_eq!(response.resolved.overall, Some(AttendanceStatus::EarlyLeave));
}

#[tokio::test]
async fn test_my_attendance_passes_not_checked_and_unknown_codes_through() {
    let mut ctx = TestContext::new().student();
    ctx.backend.expect_my_attendance().returning(|_, _, _| {
        Ok(AttendanceRecord {
            morning_status: Some(AttendanceStatus::NotChecked),
            lunch_status: Some(AttendanceStatus::Other("CHECKED".to_string())),
            ..AttendanceRecord::default()
        })
    });
    let server = ctx.server();

    let response: MyAttendanceResponse = server
        .get("/api/attendance/me")
        .add_query_param("date", "2025-03-07")
        .await
        .json();

    assert_eq!(response.resolved.morning, Some(AttendanceStatus::NotChecked));
    assert_eq!(
        response.resolved.lunch,
        Some(AttendanceStatus::Other("CHECKED".to_string()))
    );
    assert_eq!(response.resolved.dinner, Some(AttendanceStatus::Absent));
    assert_eq!(response.labels.morning, "미체크");
    assert_eq!(response.labels.lunch, "CHECKED");
    assert_eq!(response.badges.morning, "badge-pending");
    assert_eq!(response.badges.dinner, "badge-error");
}

#[tokio::test]
async fn test_my_attendance_without_overall_is_unregistered() {
    let mut ctx = TestContext::new().student();
    ctx.backend
        .expect_my_attendance()
        .returning(|_, _, _| Ok(AttendanceRecord::default()));
    let server = ctx.server();

    let response: MyAttendanceResponse = server
        .get("/api/attendance/me")
        .add_query_param("date", "2025-03-12")
        .await
        .json();

    assert_eq!(response.resolved.overall, None);
    assert_eq!(response.labels.morning, "-");
    assert_eq!(response.labels.overall, "미등록");
    assert_eq!(response.badges.overall, "badge-pending");
}

#[tokio::test]
async fn test_my_attendance_surfaces_backend_outage() {
    let mut ctx = TestContext::new().student();
    ctx.backend
        .expect_my_attendance()
        .returning(|_, _, _| Err(AttendanceError::Backend(eyre::eyre!("502 from upstream"))));
    let server = ctx.server();

    server
        .get("/api/attendance/me")
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
}
