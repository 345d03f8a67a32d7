//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode};
use std::fmt;

use blog_core::error::DomainError;
use blog_core::ports::AuthError;
use blog_core::validation::FieldError;
use blog_shared::{ErrorResponse, InvalidParam};

/// Application-level error type that converts to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// 404 with an empty body.
    NotFound,
    BadRequest(String),
    Validation(Vec<FieldError>),
    Unauthorized,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Not found"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound => return HttpResponse::NotFound().finish(),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(errors) => ErrorResponse::validation(
                errors
                    .iter()
                    .map(|e| InvalidParam {
                        name: e.field.to_string(),
                        reason: e.message.clone(),
                    })
                    .collect(),
            ),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                tracing::debug!(entity_type, id, "Entity not found");
                AppError::NotFound
            }
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::MissingReference(msg) => AppError::BadRequest(msg.to_string()),
            DomainError::Duplicate(msg) => AppError::BadRequest(msg),
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::HashingError(_) | AuthError::Repository(_) => {
                AppError::Internal(err.to_string())
            }
            other => {
                tracing::debug!(reason = %other, "Authentication rejected");
                AppError::Unauthorized
            }
        }
    }
}

/// Malformed JSON bodies become RFC 7807 400s instead of plain text.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
