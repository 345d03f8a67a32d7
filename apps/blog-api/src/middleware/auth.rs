//! Authentication middleware and extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::Future;
use std::pin::Pin;

use blog_core::ports::AuthError;
use blog_core::services::Principal;
use blog_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// The bearer token is checked against the signing key and then against the
/// stored account, so tokens of deleted users stop working immediately.
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
}

impl From<Principal> for Identity {
    fn from(principal: Principal) -> Self {
        Self {
            user_id: principal.user().id,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::HashingError(_) | AuthError::Repository(_) => {
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::BlankUsername | AuthError::UserNotFound(_) | AuthError::InvalidCredentials => {
                ErrorResponse::new(401, "Invalid Token")
                    .with_detail("The token does not belong to an existing account.")
            }
            AuthError::HashingError(_) | AuthError::Repository(_) => {
                tracing::error!("Authentication backend failure: {}", self.0);
                ErrorResponse::internal_error()
            }
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("AppState not found in app data");
                AuthenticationError(AuthError::InvalidToken(
                    "Server configuration error".to_string(),
                ))
            })?;
            let token = token.map_err(AuthenticationError)?;

            let principal = state
                .auth
                .authenticate(&token)
                .await
                .map_err(AuthenticationError)?;

            Ok(Identity::from(principal))
        })
    }
}
