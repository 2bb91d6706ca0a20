use attendance_api::middleware::error_handling::{map_error, AppError};
use attendance_core::errors::AttendanceError;
use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

#[rstest]
#[case(AttendanceError::NotFound("Member not found".into()), StatusCode::NOT_FOUND)]
#[case(AttendanceError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case(AttendanceError::Authentication("Not signed in".into()), StatusCode::UNAUTHORIZED)]
#[case(AttendanceError::Authorization("Admins only".into()), StatusCode::FORBIDDEN)]
#[case(AttendanceError::Backend(eyre::eyre!("Connection refused")), StatusCode::BAD_GATEWAY)]
#[case(
    AttendanceError::Internal(Box::new(std::io::Error::other("Disk full"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: AttendanceError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response =
        AppError(AttendanceError::Validation("Invalid input".to_string())).into_response();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Validation error: Invalid input" }));
}

#[test]
fn test_eyre_report_is_internal() {
    let error: AppError = eyre::eyre!("Failed to write store").into();
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
