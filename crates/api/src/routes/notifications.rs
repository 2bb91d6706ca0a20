use axum::{
    routing::{delete, get, patch},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        // Kept by the console itself
        .route(
            "/api/notifications",
            get(handlers::notifications::list_notifications)
                .post(handlers::notifications::add_notification)
                .delete(handlers::notifications::clear_notifications),
        )
        .route(
            "/api/notifications/read-all",
            patch(handlers::notifications::mark_all_read),
        )
        .route(
            "/api/notifications/:id/read",
            patch(handlers::notifications::mark_read),
        )
        .route(
            "/api/notifications/:id",
            delete(handlers::notifications::remove_notification),
        )
        // Raised by the backend
        .route("/api/inbox", get(handlers::notifications::inbox))
        .route("/api/inbox/all", get(handlers::notifications::inbox_history))
        .route(
            "/api/inbox/unread-count",
            get(handlers::notifications::inbox_unread_count),
        )
        .route(
            "/api/inbox/read-all",
            patch(handlers::notifications::mark_inbox_all_read),
        )
        .route(
            "/api/inbox/:id/read",
            patch(handlers::notifications::mark_inbox_read),
        )
}
