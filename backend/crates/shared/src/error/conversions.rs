//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from driver and framework errors to [`AppError`].

#[cfg(feature = "sqlx")]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // PostgreSQL error codes
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    // Class 23 — Integrity Constraint Violation
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23503") => AppError::conflict("Referenced record does not exist")
                        .with_action("Refresh the page and choose an existing record"),
                    Some("23505") => AppError::conflict("Duplicate key value"),
                    Some("23514") => AppError::unprocessable("Check constraint violation"),
                    // Class 53 — Insufficient Resources
                    Some("53000" | "53100" | "53200" | "53300") => {
                        AppError::service_unavailable("Database resource exhausted")
                    }
                    // Class 57 — Operator Intervention
                    Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Database unavailable")
                    }
                    _ => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            sqlx::Error::Protocol(_) => {
                AppError::internal("Database protocol error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// HTTP status (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl super::app_error::AppError {
    /// Status code as an `http` type, falling back to 500
    pub fn http_status(&self) -> http::StatusCode {
        http::StatusCode::from_u16(self.status_code())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}
