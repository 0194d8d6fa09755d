use axum::http::StatusCode;
use rstest::rstest;
use seance_api::middleware::error_handling::{map_error, AppError};
use seance_core::errors::SeanceError;

#[rstest]
#[case(SeanceError::NotFound("Course not found".to_string()), StatusCode::NOT_FOUND)]
#[case(SeanceError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(SeanceError::Configuration("Bad slot".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(SeanceError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: SeanceError, #[case] status: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), status);
}

#[test]
fn test_eyre_report_becomes_database_error() {
    let app_error: AppError = eyre::eyre!("connection reset").into();

    assert!(matches!(app_error.0, SeanceError::Database(_)));
}

#[test]
fn test_seance_error_converts_into_app_error() {
    let app_error: AppError = SeanceError::Validation("Bad".to_string()).into();

    assert!(matches!(app_error.0, SeanceError::Validation(_)));
}
