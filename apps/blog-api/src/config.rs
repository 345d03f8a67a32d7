//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::DatabaseConfig;

use crate::middleware::cors::CorsConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations before serving.
    pub auto_migrate: bool,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 100),
            min_connections: parse_or("DB_MIN_CONNECTIONS", 10),
            sqlx_logging: flag("DB_LOG_STATEMENTS", false),
        });

        let defaults = CorsConfig::default();
        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| split_origins(&v))
            .unwrap_or(defaults.allowed_origins);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database,
            auto_migrate: flag("DB_AUTO_MIGRATE", true),
            cors: CorsConfig {
                permissive: flag("CORS_PERMISSIVE", false),
                allowed_origins,
            },
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | ""))
        .unwrap_or(default)
}

/// Comma-separated origin list, blanks dropped.
fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
