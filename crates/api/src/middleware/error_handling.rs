//! # Error Handling Middleware
//!
//! Maps [`AttendanceError`]s to HTTP status codes and a JSON `{ "error": message }`
//! body, so every handler fails the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use attendance_core::errors::AttendanceError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use attendance_api::middleware::error_handling::AppError;
/// use attendance_core::errors::AttendanceError;
///
/// async fn handler(login_id: String) -> Result<Json<String>, AppError> {
///     if login_id.is_empty() {
///         return Err(AppError(AttendanceError::Validation("Login ID is required".into())));
///     }
///     Ok(Json(login_id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub AttendanceError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AttendanceError::NotFound(_) => StatusCode::NOT_FOUND,
            AttendanceError::Validation(_) => StatusCode::BAD_REQUEST,
            AttendanceError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AttendanceError::Authorization(_) => StatusCode::FORBIDDEN,
            AttendanceError::Backend(_) => StatusCode::BAD_GATEWAY,
            AttendanceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<AttendanceError> for AppError {
    fn from(err: AttendanceError) -> Self {
        AppError(err)
    }
}

/// Local plumbing failures (store I/O and the like) surface as internal errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(AttendanceError::Internal(err.into()))
    }
}

/// Maps an AttendanceError to an HTTP response
pub fn map_error(err: AttendanceError) -> Response {
    AppError(err).into_response()
}
