//! Persistence: SeaORM repositories for PostgreSQL and an in-memory
//! fallback with the same referential rules.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use memory::{
    InMemoryDatabase, InMemoryPostRepository, InMemoryThemeRepository, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
pub use postgres_base::PostgresBaseRepository;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresPostRepository, PostgresThemeRepository, PostgresUserRepository,
};
