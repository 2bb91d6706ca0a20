use attendance_core::models::leave::{LeaveRequest, LeaveStatus, LeaveType};
use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::test_utils::{date, TestContext};

fn leave(id: i64, status: LeaveStatus, day: u32) -> LeaveRequest {
    LeaveRequest {
        id,
        student_name: Some("Kim".to_string()),
        leave_type: LeaveType::Sick,
        start_date: Some(date(2025, 3, day)),
        reason: "Fever".to_string(),
        status,
        created_at: Some(Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap()),
        evidence_file_name: None,
        reject_reason: None,
    }
}

fn all_requests() -> Vec<LeaveRequest> {
    vec![
        leave(1, LeaveStatus::Approved, 3),
        leave(2, LeaveStatus::Pending, 7),
        leave(3, LeaveStatus::Rejected, 5),
        leave(4, LeaveStatus::Approved, 9),
    ]
}

#[rstest]
#[case(None, vec![4, 2, 3, 1])]
#[case(Some("APPROVED"), vec![4, 1])]
#[case(Some("REJECTED"), vec![3])]
#[tokio::test]
async fn test_admin_leave_listing(#[case] status: Option<&str>, #[case] expected: Vec<i64>) {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_all_leave_requests()
        .returning(|| Ok(all_requests()));
    let server = ctx.server();

    let mut request = server.get("/api/admin/leave-requests");
    if let Some(status) = status {
        request = request.add_query_param("status", status);
    }
    let requests: Vec<LeaveRequest> = request.await.json();

    let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_pending_filter_uses_pending_listing() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_pending_leave_requests()
        .times(1)
        .returning(|| Ok(vec![leave(2, LeaveStatus::Pending, 7)]));
    let server = ctx.server();

    let requests: Vec<LeaveRequest> = server
        .get("/api/admin/leave-requests")
        .add_query_param("status", "PENDING")
        .await
        .json();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].is_cancellable());
}

#[tokio::test]
async fn test_reject_requires_reason() {
    let server = TestContext::new().admin().server();

    server
        .patch("/api/admin/leave-requests/2/reject")
        .json(&json!({ "reason": "   " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reject_with_reason() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_reject_leave_request()
        .withf(|id, reason| *id == 2 && reason == "No evidence")
        .times(1)
        .returning(|_, _| Ok(()));
    let server = ctx.server();

    server
        .patch("/api/admin/leave-requests/2/reject")
        .json(&json!({ "reason": " No evidence " }))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_approve() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_approve_leave_request()
        .withf(|id| *id == 2)
        .times(1)
        .returning(|_| Ok(()));
    let server = ctx.server();

    server
        .patch("/api/admin/leave-requests/2/approve")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_student_sees_own_requests_newest_first() {
    let mut ctx = TestContext::new().student();
    ctx.backend
        .expect_my_leave_requests()
        .withf(|login_id| login_id == "student01")
        .returning(|_| Ok(all_requests()));
    let server = ctx.server();

    let requests: Vec<LeaveRequest> = server.get("/api/leave-requests/me").await.json();
    let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![4, 2, 3, 1]);
}

#[tokio::test]
async fn test_student_files_and_cancels_request() {
    let mut ctx = TestContext::new().student();
    ctx.backend
        .expect_create_leave_request()
        .withf(|login_id, request, evidence| {
            login_id == "student01" && request.leave_type == LeaveType::EarlyLeave && evidence.is_none()
        })
        .times(1)
        .returning(|_, _, _| Ok(leave(5, LeaveStatus::Pending, 10)));
    ctx.backend
        .expect_cancel_leave_request()
        .withf(|id, login_id| *id == 5 && login_id == "student01")
        .times(1)
        .returning(|_, _| Ok(()));
    let server = ctx.server();

    let response = server
        .post("/api/leave-requests")
        .json(&json!({
            "leaveDate": "2025-03-10",
            "leaveType": "EARLY_LEAVE",
            "reason": "Hospital appointment"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<LeaveRequest>().id, 5);

    server
        .delete("/api/leave-requests/5")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_blank_reason_never_reaches_backend() {
    let server = TestContext::new().student().server();

    server
        .post("/api/leave-requests")
        .json(&json!({
            "leaveDate": "2025-03-10",
            "leaveType": "SICK",
            "reason": ""
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
