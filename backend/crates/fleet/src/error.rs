//! Fleet Error Types
//!
//! This module provides fleet-specific error variants that integrate
//! with the unified `kernel::error::AppError` system and render as HTML
//! error pages.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::{CarId, CustomerId, RentalId, ServiceRecordId};
use thiserror::Error;

use crate::domain::validation::ValidationErrors;

/// Fleet-specific result type alias
pub type FleetResult<T> = Result<T, FleetError>;

#[derive(Debug, Error)]
pub enum FleetError {
    /// Submitted form failed validation; handlers re-render the form
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Car {0} not found")]
    CarNotFound(CarId),

    #[error("Customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error("Rental {0} not found")]
    RentalNotFound(RentalId),

    #[error("Service record {0} not found")]
    ServiceRecordNotFound(ServiceRecordId),

    /// Path segment that is not a record id
    #[error("No record with id {0:?}")]
    InvalidId(String),

    /// Template failed to render
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FleetError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FleetError::Validation(_) => ErrorKind::UnprocessableEntity,
            FleetError::CarNotFound(_)
            | FleetError::CustomerNotFound(_)
            | FleetError::RentalNotFound(_)
            | FleetError::ServiceRecordNotFound(_)
            | FleetError::InvalidId(_) => ErrorKind::NotFound,
            FleetError::Template(_) | FleetError::Internal(_) => ErrorKind::InternalServerError,
            // Refined by the SQLSTATE mapping in `into_app_error`
            FleetError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError; database errors keep their source for logs
    pub fn into_app_error(self) -> AppError {
        match self {
            FleetError::Database(e) => AppError::from(e),
            FleetError::Template(e) => AppError::internal("Page could not be rendered").with_source(e),
            FleetError::Internal(msg) => AppError::internal(msg),
            other => {
                let kind = other.kind();
                AppError::new(kind, other.to_string())
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            FleetError::Database(e) => {
                tracing::error!(error = %e, "Fleet database error");
            }
            FleetError::Template(e) => {
                tracing::error!(error = ?e, "Fleet template error");
            }
            FleetError::Internal(msg) => {
                tracing::error!(message = %msg, "Fleet internal error");
            }
            FleetError::Validation(errors) => {
                tracing::debug!(errors = %errors, "Form validation failed");
            }
            _ => {
                tracing::info!(error = %self, "Fleet record not found");
            }
        }
    }
}

impl IntoResponse for FleetError {
    fn into_response(self) -> Response {
        self.log();
        let app_error = self.into_app_error();
        let status = app_error.http_status();
        (status, Html(error_page(&app_error))).into_response()
    }
}

/// Standalone error page; does not depend on the template registry so that
/// template failures can still be reported
fn error_page(error: &AppError) -> String {
    // Server errors never expose driver details
    let detail = if error.is_server_error() {
        "Something went wrong while handling this request."
    } else {
        error.message()
    };
    let action = error
        .action()
        .map(|a| format!("<p>{}</p>", tera::escape_html(a)))
        .unwrap_or_default();

    format!(
        "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{status} {title}</title></head>\
         <body><main class=\"error\"><h1>{status} {title}</h1><p>{detail}</p>{action}\
         <p><a href=\"/\">Back to dashboard</a></p></main></body></html>\n",
        status = error.status_code(),
        title = error.kind().as_str(),
        detail = tera::escape_html(detail),
        action = action,
    )
}

/// Status used when re-rendering a form with validation errors
pub const VALIDATION_STATUS: StatusCode = StatusCode::UNPROCESSABLE_ENTITY;
