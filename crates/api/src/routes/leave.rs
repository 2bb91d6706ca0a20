use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/leave-requests",
            post(handlers::leave::create_leave_request),
        )
        .route(
            "/api/leave-requests/me",
            get(handlers::leave::my_leave_requests),
        )
        .route(
            "/api/leave-requests/:id",
            delete(handlers::leave::cancel_leave_request),
        )
}
