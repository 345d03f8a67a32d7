//! CORS policy.

use actix_cors::Cors;
use actix_web::http::{Method, header};

/// Which origins may call the API from a browser.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allow any origin and header. Development only.
    pub permissive: bool,
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            permissive: false,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
        }
    }
}

/// Build the CORS middleware; called once per worker.
pub fn build_cors(config: &CorsConfig) -> Cors {
    if config.permissive {
        return Cors::permissive();
    }

    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}
