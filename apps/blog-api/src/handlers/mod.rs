//! HTTP handlers and route configuration.

mod health;
mod posts;
mod themes;
mod users;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::json_error_handler;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Public routes
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/postagens")
                .route("", web::get().to(posts::list))
                .route("", web::post().to(posts::create))
                .route("", web::put().to(posts::update))
                .route("/titulo/{titulo}", web::get().to(posts::list_by_title))
                .route("/{id}", web::get().to(posts::get_by_id))
                .route("/{id}", web::delete().to(posts::delete)),
        )
        .service(
            web::scope("/temas")
                .route("", web::get().to(themes::list))
                .route("", web::post().to(themes::create))
                .route("", web::put().to(themes::update))
                .route(
                    "/descricao/{descricao}",
                    web::get().to(themes::list_by_description),
                )
                .route("/{id}", web::get().to(themes::get_by_id))
                .route("/{id}", web::delete().to(themes::delete)),
        )
        .service(
            web::scope("/usuarios")
                // Public: registration and login
                .route("/cadastrar", web::post().to(users::register))
                .route("/logar", web::post().to(users::login))
                .route("/all", web::get().to(users::list))
                .route("/atualizar", web::put().to(users::update))
                .route("/{id}", web::get().to(users::get_by_id))
                .route("/{id}", web::delete().to(users::delete)),
        );
}
