//! Application services - validation, existence checks and persistence,
//! one service per resource.
//!
//! Services are built explicitly from the ports they need; nothing is wired
//! implicitly.

mod auth;
mod post;
mod theme;
mod user;

pub use auth::{AuthService, Credentials, Principal, Session};
pub use post::{PostService, THEME_MISSING, USER_MISSING};
pub use theme::ThemeService;
pub use user::{USER_EXISTS, UserService};

use crate::error::{DomainError, RepoError};
use crate::validation::{FieldError, Validate};

const ID_REQUIRED: &str = "O atributo id é obrigatório para atualização!";

/// Rejects the input unless it validates cleanly.
fn ensure_valid(input: &impl Validate) -> Result<(), DomainError> {
    let errors = input.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

/// Like [`ensure_valid`], but an update must also name the record it replaces.
fn ensure_valid_update(input: &impl Validate, id: Option<i64>) -> Result<i64, DomainError> {
    let mut errors = input.validate();
    match id {
        Some(id) if errors.is_empty() => Ok(id),
        Some(_) => Err(DomainError::Validation(errors)),
        None => {
            errors.insert(0, FieldError::new("id", ID_REQUIRED));
            Err(DomainError::Validation(errors))
        }
    }
}

/// Maps a repository miss on `id` to a typed not-found error.
fn not_found_as(entity_type: &'static str, id: i64) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}
