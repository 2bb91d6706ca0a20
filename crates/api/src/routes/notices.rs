use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/notices", get(handlers::notices::list_notices))
        .route("/api/notices/popups", get(handlers::notices::popup_notices))
        .route(
            "/api/notices/popups/dismiss",
            post(handlers::notices::dismiss_popups),
        )
        .route("/api/notices/:id", get(handlers::notices::get_notice))
}
