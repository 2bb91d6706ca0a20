use attendance_api::handlers::notifications::{Inbox, LocalNotificationList};
use attendance_core::models::notification::{Notification, NotificationKind};
use attendance_store::models::LocalNotification;
use axum::http::StatusCode;
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::watch;
use uuid::Uuid;

use crate::test_utils::{server_for, TestContext};

#[tokio::test]
async fn test_local_notification_lifecycle() {
    let server = TestContext::new().server();

    let first: LocalNotification = server
        .post("/api/notifications")
        .json(&json!({ "title": "Check-in saved", "message": "Morning" }))
        .await
        .json();
    server
        .post("/api/notifications")
        .json(&json!({ "title": "Leave approved", "kind": "LEAVE_APPROVED" }))
        .await
        .assert_status(StatusCode::CREATED);

    let list: LocalNotificationList = server.get("/api/notifications").await.json();
    assert_eq!(list.unread_count, 2);
    assert_eq!(list.notifications[0].title, "Leave approved");
    assert_eq!(
        list.notifications[0].kind,
        Some(NotificationKind::LeaveApproved)
    );

    server
        .patch(&format!("/api/notifications/{}/read", first.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let list: LocalNotificationList = server.get("/api/notifications").await.json();
    assert_eq!(list.unread_count, 1);

    server
        .patch("/api/notifications/read-all")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete(&format!("/api/notifications/{}", first.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let list: LocalNotificationList = server.get("/api/notifications").await.json();
    assert_eq!(list.unread_count, 0);
    assert_eq!(list.notifications.len(), 1);

    server
        .delete("/api/notifications")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let list: LocalNotificationList = server.get("/api/notifications").await.json();
    assert!(list.notifications.is_empty());
}

#[tokio::test]
async fn test_unknown_local_notification() {
    let server = TestContext::new().server();

    server
        .patch(&format!("/api/notifications/{}/read", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inbox_serves_latest_polled_list() {
    let (tx, rx) = watch::channel(Vec::new());
    let state = TestContext::new().student().state().with_unread_feed(rx);
    let server = server_for(state);

    let inbox: Inbox = server.get("/api/inbox").await.json();
    assert_eq!(inbox.unread_count, 0);

    tx.send(vec![Notification {
        id: 41,
        kind: NotificationKind::LeaveRequest,
        title: None,
        message: "New leave request".to_string(),
        read: false,
        created_at: None,
    }])
    .unwrap();

    let inbox: Inbox = server.get("/api/inbox").await.json();
    assert_eq!(inbox.unread_count, 1);
    assert_eq!(inbox.notifications[0].kind.target_path(), Some("/admin/leaves"));
}

#[tokio::test]
async fn test_inbox_mark_read_proxies_backend() {
    let mut ctx = TestContext::new().student();
    ctx.backend
        .expect_mark_notification_read()
        .with(predicate::eq(41))
        .times(1)
        .returning(|_| Ok(()));
    let server = ctx.server();

    server
        .patch("/api/inbox/41/read")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_inbox_unread_count_asks_backend() {
    let mut ctx = TestContext::new().student();
    ctx.backend.expect_unread_count().returning(|| Ok(3));
    let server = ctx.server();

    let body: serde_json::Value = server.get("/api/inbox/unread-count").await.json();
    assert_eq!(body, json!({ "count": 3 }));
}

#[tokio::test]
async fn test_inbox_requires_sign_in() {
    let server = TestContext::new().server();

    server
        .get("/api/inbox/all")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
