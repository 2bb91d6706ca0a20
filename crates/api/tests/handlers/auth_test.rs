use attendance_core::{
    errors::AttendanceError,
    models::{
        auth::{LoginResponse, SessionUser},
        member::{Member, Role},
    },
};
use attendance_store::LocalStore;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_login_saves_session() {
    let mut ctx = TestContext::new();
    ctx.backend
        .expect_login()
        .withf(|login_id, password| login_id == "student01" && password == "secret")
        .times(1)
        .returning(|_, _| {
            Ok(LoginResponse {
                access_token: "access".to_string(),
                refresh_token: Some("refresh".to_string()),
                id: 7,
                login_id: None,
                name: "Kim".to_string(),
                role: Role::Student,
            })
        });
    let server = ctx.server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "loginId": "student01", "password": "secret" }))
        .await;
    response.assert_status_ok();

    let user: SessionUser = response.json();
    assert_eq!(user.member_id, 7);
    assert_eq!(user.login_id, "student01");

    let me: SessionUser = server.get("/api/auth/me").await.json();
    assert_eq!(me, user);
}

#[tokio::test]
async fn test_login_rejected_by_backend() {
    let mut ctx = TestContext::new();
    ctx.backend.expect_login().returning(|_, _| {
        Err(AttendanceError::Authentication(
            "Invalid credentials".to_string(),
        ))
    });
    let server = ctx.server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "loginId": "student01", "password": "wrong" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/api/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_session_even_if_backend_fails() {
    let mut ctx = TestContext::new().student();
    ctx.backend
        .expect_logout()
        .returning(|| Err(AttendanceError::Backend(eyre::eyre!("timeout"))));
    let server = ctx.server();

    server.get("/api/auth/me").await.assert_status_ok();
    server
        .post("/api/auth/logout")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get("/api/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_local_time() {
    let server = TestContext::new().at(9, 15).server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "status": "ok",
        "localTime": "2025-03-10T09:15:00",
        "signedIn": false
    }));
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("console.json");

    let mut ctx = TestContext::new();
    ctx.store = LocalStore::open(&path).await.unwrap();
    ctx.backend.expect_login().returning(|_, _| {
        Ok(LoginResponse {
            access_token: "access".to_string(),
            refresh_token: None,
            id: 1,
            login_id: Some("admin".to_string()),
            name: "Lee".to_string(),
            role: Role::Admin,
        })
    });
    let server = ctx.server();
    server
        .post("/api/auth/login")
        .json(&json!({ "loginId": "admin", "password": "secret" }))
        .await
        .assert_status_ok();
    drop(server);

    let mut ctx = TestContext::new();
    ctx.store = LocalStore::open(&path).await.unwrap();
    let server = ctx.server();

    let me: SessionUser = server.get("/api/auth/me").await.json();
    assert_eq!(me.login_id, "admin");
    assert!(me.is_admin());
}

#[tokio::test]
async fn test_profile_update_cannot_change_role() {
    let mut ctx = TestContext::new().student();
    ctx.backend
        .expect_update_my_info()
        .withf(|request| request.role.is_none() && request.name.as_deref() == Some("Kim"))
        .times(1)
        .returning(|_| {
            Ok(Member {
                id: 7,
                login_id: "student01".to_string(),
                name: "Kim".to_string(),
                address: None,
                phone_number: None,
                role: Role::Student,
            })
        });
    let server = ctx.server();

    let member: Member = server
        .patch("/api/members/me")
        .json(&json!({ "name": "Kim", "role": "ADMIN" }))
        .await
        .json();
    assert_eq!(member.role, Role::Student);
}
