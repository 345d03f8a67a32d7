//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{
    PasswordService, PostRepository, ThemeRepository, TokenService, UserRepository,
};
use blog_core::services::{AuthService, PostService, ThemeService, UserService};
use blog_infra::{DatabaseConfig, InMemoryDatabase};

#[cfg(feature = "postgres")]
use blog_infra::DatabaseConnections;
#[cfg(feature = "postgres")]
use blog_infra::database::{
    PostgresPostRepository, PostgresThemeRepository, PostgresUserRepository,
};

/// The three repositories, backed by one store.
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub themes: Arc<dyn ThemeRepository>,
    pub users: Arc<dyn UserRepository>,
    /// `"postgres"` or `"memory"`, reported by the health check.
    pub store: &'static str,
}

impl Repositories {
    pub fn in_memory() -> Self {
        let db = InMemoryDatabase::new();
        Self {
            posts: Arc::new(db.posts()),
            themes: Arc::new(db.themes()),
            users: Arc::new(db.users()),
            store: "memory",
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: &DatabaseConnections) -> Self {
        Self {
            posts: Arc::new(PostgresPostRepository::new(connections.main.clone())),
            themes: Arc::new(PostgresThemeRepository::new(connections.main.clone())),
            users: Arc::new(PostgresUserRepository::new(connections.main.clone())),
            store: "postgres",
        }
    }

    /// Connect to the configured database, falling back to the in-memory
    /// store when it is absent or unreachable.
    #[cfg(feature = "postgres")]
    pub async fn connect(db_config: Option<&DatabaseConfig>, auto_migrate: bool) -> Self {
        use migration::{Migrator, MigratorTrait};

        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        let connections = match DatabaseConnections::init(config).await {
            Ok(connections) => connections,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Self::in_memory();
            }
        };

        if auto_migrate {
            if let Err(e) = Migrator::up(&connections.main, None).await {
                tracing::error!("Migration failed: {}. Using in-memory fallback.", e);
                return Self::in_memory();
            }
            tracing::info!("Database schema up to date");
        }

        Self::postgres(&connections)
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn connect(_db_config: Option<&DatabaseConfig>, _auto_migrate: bool) -> Self {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Self::in_memory()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub themes: Arc<ThemeService>,
    pub users: Arc<UserService>,
    pub auth: Arc<AuthService>,
    pub store: &'static str,
}

impl AppState {
    /// Wire the services over `repos`.
    pub fn new(
        repos: Repositories,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        let state = Self {
            posts: Arc::new(PostService::new(
                repos.posts.clone(),
                repos.themes.clone(),
                repos.users.clone(),
            )),
            themes: Arc::new(ThemeService::new(repos.themes, repos.posts)),
            users: Arc::new(UserService::new(repos.users.clone(), passwords.clone())),
            auth: Arc::new(AuthService::new(repos.users, passwords, tokens)),
            store: repos.store,
        };

        tracing::info!(store = state.store, "Application state initialized");
        state
    }
}
