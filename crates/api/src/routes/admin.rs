use axum::{
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        // Attendance board and corrections
        .route(
            "/api/admin/attendance-board",
            get(handlers::admin::attendance_board),
        )
        .route(
            "/api/admin/attendances/export",
            get(handlers::admin::export_attendance),
        )
        .route(
            "/api/admin/attendances/status",
            put(handlers::admin::update_attendance_status),
        )
        .route(
            "/api/admin/attendances/:id",
            patch(handlers::admin::change_attendance_status),
        )
        .route(
            "/api/admin/attendances/member/:member_id",
            patch(handlers::admin::change_member_attendance_status),
        )
        // Check-in configurations
        .route(
            "/api/admin/attendance-configs",
            get(handlers::configs::list_configs).post(handlers::configs::create_config),
        )
        .route(
            "/api/admin/attendance-configs/:id",
            get(handlers::configs::get_config)
                .patch(handlers::configs::update_config)
                .delete(handlers::configs::delete_config),
        )
        .route(
            "/api/admin/attendance-configs/:id/auth-number",
            patch(handlers::configs::update_auth_number),
        )
        // Leave review
        .route(
            "/api/admin/leave-requests",
            get(handlers::leave::list_leave_requests),
        )
        .route(
            "/api/admin/leave-requests/:id/approve",
            patch(handlers::leave::approve_leave_request),
        )
        .route(
            "/api/admin/leave-requests/:id/reject",
            patch(handlers::leave::reject_leave_request),
        )
        // Notices
        .route(
            "/api/admin/notices",
            post(handlers::notices::create_notice),
        )
        .route(
            "/api/admin/notices/:id",
            put(handlers::notices::update_notice).delete(handlers::notices::delete_notice),
        )
        // Members
        .route(
            "/api/members",
            get(handlers::members::list_members).post(handlers::members::create_member),
        )
        .route(
            "/api/members/:login_id",
            get(handlers::members::get_member)
                .patch(handlers::members::update_member)
                .delete(handlers::members::delete_member),
        )
}
