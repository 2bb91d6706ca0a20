use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/attendance/current-slot",
            get(handlers::attendance::get_current_slot),
        )
        .route(
            "/api/attendance/check-in",
            post(handlers::attendance::check_in),
        )
        .route("/api/attendance/me", get(handlers::attendance::my_attendance))
}
