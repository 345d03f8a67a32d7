//! SeaORM entities, one module per table.

pub mod post;
pub mod theme;
pub mod user;
