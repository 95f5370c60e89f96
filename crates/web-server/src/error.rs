use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use report::ReportError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Every rule the submitted parameters broke, reported together.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Malformed request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl AppError {
    pub fn scenario_not_found() -> Self {
        AppError::NotFound("Scenario not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Body(rejection) => rejection.status(),
            AppError::Database(DbError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Database(DbError::DuplicateName(_)) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Validation(errors) => {
                let body = Json(json!({ "success": false, "errors": errors }));
                return (status, body).into_response();
            }
            AppError::BadRequest(message) | AppError::NotFound(message) => message,
            AppError::Body(rejection) => rejection.body_text(),
            AppError::Database(DbError::NotFound) => "Scenario not found".to_string(),
            AppError::Database(DbError::DuplicateName(_)) => {
                "Scenario name already exists".to_string()
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                "An internal database error occurred".to_string()
            }
            AppError::Report(report_err) => {
                tracing::error!(error = ?report_err, "Report rendering error.");
                "Failed to generate report".to_string()
            }
        };

        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}
