//! # Error Handling Middleware
//!
//! This module maps domain errors to HTTP status codes and JSON error
//! responses, so every handler reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use seance_core::errors::SeanceError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `SeanceError` instances and implements `IntoResponse`
/// to convert them into HTTP responses with a `{"error": "..."}` body.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use seance_api::middleware::error_handling::AppError;
/// use seance_core::errors::SeanceError;
///
/// async fn handler(name: String) -> Result<Json<String>, AppError> {
///     if name.trim().is_empty() {
///         return Err(AppError(SeanceError::Validation("Name is required".to_string())));
///     }
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SeanceError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SeanceError::NotFound(_) => StatusCode::NOT_FOUND,
            SeanceError::Validation(_) => StatusCode::BAD_REQUEST,
            SeanceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SeanceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Request rejected: {}", self.0);
        }
    
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));
    
        (status, body).into_response()
    }
}

/// Allows `?` on `Result<T, SeanceError>` inside handlers.
impl From<SeanceError> for AppError {
    fn from(err: SeanceError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as `SeanceError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SeanceError::Database(err))
    }
}

/// Maps a SeanceError to an HTTP response
pub fn map_error(err: SeanceError) -> Response {
    AppError(err).into_response()
}
