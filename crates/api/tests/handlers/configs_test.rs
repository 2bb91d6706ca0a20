use attendance_core::models::{attendance_config::AttendanceConfig, slot::Slot};
use axum::http::StatusCode;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{date, time, TestContext};

fn config(id: i64, target_date: NaiveDate, slot: Slot) -> AttendanceConfig {
    AttendanceConfig {
        id,
        course_id: Some(1),
        target_date,
        slot,
        auth_number: "1234".to_string(),
        start_time: None,
        standard_time: time(8, 50),
        deadline: time(9, 10),
        valid_minutes: Some(20),
    }
}

#[tokio::test]
async fn test_configs_listed_newest_first() {
    let mut ctx = TestContext::new().admin();
    ctx.backend.expect_attendance_configs().returning(|_| {
        Ok(vec![
            config(1, date(2025, 3, 8), Slot::Lunch),
            config(2, date(2025, 3, 10), Slot::Dinner),
            config(3, date(2025, 3, 10), Slot::Morning),
            config(4, date(2025, 3, 9), Slot::Morning),
        ])
    });
    let server = ctx.server();

    let configs: Vec<AttendanceConfig> = server.get("/api/admin/attendance-configs").await.json();
    let ids: Vec<i64> = configs.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 2, 4, 1]);

    let filtered: Vec<AttendanceConfig> = server
        .get("/api/admin/attendance-configs")
        .add_query_param("date", "2025-03-09")
        .await
        .json();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, 4);
}

#[tokio::test]
async fn test_create_config_fills_default_window() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_create_attendance_config()
        .withf(|request| {
            request.slot == Slot::Morning
                && request.start_time == time(8, 30)
                && request.standard_time == time(8, 50)
                && request.deadline == time(9, 10)
                && request.valid_minutes == 20
        })
        .times(1)
        .returning(|request| {
            Ok(AttendanceConfig {
                id: 9,
                course_id: Some(request.course_id),
                target_date: request.target_date,
                slot: request.slot,
                auth_number: request.auth_number.clone(),
                start_time: Some(request.start_time),
                standard_time: request.standard_time,
                deadline: request.deadline,
                valid_minutes: Some(request.valid_minutes),
            })
        });
    let server = ctx.server();

    let response = server
        .post("/api/admin/attendance-configs")
        .json(&json!({
            "targetDate": "2025-03-11",
            "type": "MORNING",
            "authNumber": "4821"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let created: AttendanceConfig = response.json();
    assert_eq!(created.id, 9);
    assert_eq!(created.start(), Some(time(8, 30)));
}

#[tokio::test]
async fn test_create_config_rejects_inverted_window() {
    let server = TestContext::new().admin().server();

    server
        .post("/api/admin/attendance-configs")
        .json(&json!({
            "targetDate": "2025-03-11",
            "type": "LUNCH",
            "authNumber": "4821",
            "startTime": "12:30",
            "standardTime": "12:30",
            "deadline": "13:00"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_config_rejects_bad_auth_number() {
    let server = TestContext::new().admin().server();

    server
        .post("/api/admin/attendance-configs")
        .json(&json!({
            "targetDate": "2025-03-11",
            "type": "DINNER",
            "authNumber": "48"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_auth_number() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_update_auth_number()
        .withf(|id, auth_number| *id == 3 && auth_number == "9876")
        .times(1)
        .returning(|id, auth_number| {
            Ok(AttendanceConfig {
                auth_number: auth_number.to_string(),
                ..config(id, date(2025, 3, 10), Slot::Morning)
            })
        });
    let server = ctx.server();

    let updated: AttendanceConfig = server
        .patch("/api/admin/attendance-configs/3/auth-number")
        .json(&json!({ "authNumber": "9876" }))
        .await
        .json();
    assert_eq!(updated.auth_number, "9876");

    server
        .patch("/api/admin/attendance-configs/3/auth-number")
        .json(&json!({ "authNumber": "98765" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_config() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_delete_attendance_config()
        .withf(|id| *id == 5)
        .times(1)
        .returning(|_| Ok(()));
    let server = ctx.server();

    server
        .delete("/api/admin/attendance-configs/5")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}
