//! # Blog Shared
//!
//! Wire types shared between the API and its clients: request and response
//! bodies with the API's JSON field names, and RFC 7807 error bodies.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, InvalidParam};
