use attendance_core::models::notice::{Notice, NoticePage};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{server_for, TestContext};

fn notice(id: i64, title: &str, is_popup: bool) -> Notice {
    Notice {
        id,
        title: title.to_string(),
        content: String::new(),
        is_popup,
        created_at: None,
    }
}

#[tokio::test]
async fn test_notices_default_paging() {
    let mut ctx = TestContext::new();
    ctx.backend
        .expect_notices()
        .withf(|page, size| *page == 0 && *size == 10)
        .times(1)
        .returning(|_, _| {
            Ok(NoticePage {
                content: vec![notice(1, "Welcome", false)],
                total_pages: 1,
                total_elements: 1,
                number: 0,
            })
        });
    let server = ctx.server();

    let page: NoticePage = server.get("/api/notices").await.json();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].title, "Welcome");
}

#[tokio::test]
async fn test_popups_hidden_for_rest_of_day_once_dismissed() {
    let mut ctx = TestContext::new();
    ctx.backend
        .expect_popup_notices()
        .times(1)
        .returning(|| Ok(vec![notice(2, "Holiday schedule", true)]));
    let server = ctx.server();

    let popups: Vec<Notice> = server.get("/api/notices/popups").await.json();
    assert_eq!(popups.len(), 1);

    server
        .post("/api/notices/popups/dismiss")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let popups: Vec<Notice> = server.get("/api/notices/popups").await.json();
    assert!(popups.is_empty());
}

#[tokio::test]
async fn test_popups_return_the_next_day() {
    let mut ctx = TestContext::new();
    ctx.store
        .dismiss_popups_for(chrono::NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    ctx.backend
        .expect_popup_notices()
        .times(1)
        .returning(|| Ok(vec![notice(2, "Holiday schedule", true)]));
    let server = server_for(ctx.state());

    let popups: Vec<Notice> = server.get("/api/notices/popups").await.json();
    assert_eq!(popups.len(), 1);
}

#[tokio::test]
async fn test_admin_creates_notice() {
    let mut ctx = TestContext::new().admin();
    ctx.backend
        .expect_create_notice()
        .withf(|request| request.title == "Exam week" && request.is_popup)
        .times(1)
        .returning(|request| Ok(notice(3, &request.title, request.is_popup)));
    let server = ctx.server();

    let response = server
        .post("/api/admin/notices")
        .json(&json!({ "title": "Exam week", "content": "Good luck", "isPopup": true }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Notice>().id, 3);
}

#[tokio::test]
async fn test_students_cannot_delete_notices() {
    let server = TestContext::new().student().server();

    server
        .delete("/api/admin/notices/3")
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
