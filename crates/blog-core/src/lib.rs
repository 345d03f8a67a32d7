//! # Blog Core
//!
//! The domain layer of the personal blog backend.
//! Entities, validation rules, persistence ports and the services that tie
//! them together. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use validation::{FieldError, Validate};
