use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use blog_core::domain::UserInput;
use blog_core::services::Credentials;
use blog_infra::{Argon2PasswordService, JwtConfig, JwtTokenService, PasswordConfig};

use super::configure_routes;
use crate::middleware::cors::{CorsConfig, build_cors};
use crate::state::{AppState, Repositories};

fn test_state() -> AppState {
    let passwords = Argon2PasswordService::with_config(PasswordConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap();
    let tokens = JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "blog-api-test".to_string(),
    });

    AppState::new(Repositories::in_memory(), Arc::new(passwords), Arc::new(tokens))
}

/// Register an account directly through the services and return its
/// `Authorization` header value.
async fn bearer(state: &AppState, login: &str) -> String {
    state
        .users
        .register(UserInput {
            name: Some("Root".to_string()),
            login: Some(login.to_string()),
            password: Some("rootroot".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let session = state
        .auth
        .login(Credentials {
            login: login.to_string(),
            password: "rootroot".to_string(),
        })
        .await
        .unwrap();

    format!("Bearer {}", session.token)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_health_is_public() {
    let state = test_state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[actix_rt::test]
async fn test_resources_require_token() {
    let state = test_state();
    let app = app!(state);

    for uri in ["/postagens", "/temas", "/usuarios/all"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let req = test::TestRequest::get().uri("/postagens").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["title"], "Authentication Required");
}

#[actix_rt::test]
async fn test_garbage_token_is_rejected() {
    let state = test_state();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/temas")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_post_lifecycle() {
    let state = test_state();
    let token = bearer(&state, "root@root.com").await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/temas")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({ "descricao": "Programação em Rust" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let theme: Value = test::read_body_json(resp).await;
    let theme_id = theme["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/postagens")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({
            "titulo": "Primeira postagem",
            "texto": "Olá, mundo! Este é o primeiro texto.",
            "data": "1999-01-01T00:00:00Z",
            "tema": { "id": theme_id }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Value = test::read_body_json(resp).await;
    let post_id = post["id"].as_i64().unwrap();
    assert_eq!(post["tema"]["id"], theme_id);
    assert_ne!(post["data"], "1999-01-01T00:00:00Z");

    let req = test::TestRequest::put()
        .uri("/postagens")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({
            "id": post_id,
            "titulo": "Postagem revisada",
            "texto": "Olá, mundo! Este é o texto revisado.",
            "tema": { "id": theme_id }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/postagens/{post_id}"))
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let fetched: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched["titulo"], "Postagem revisada");

    let req = test::TestRequest::delete()
        .uri(&format!("/postagens/{post_id}"))
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/postagens/{post_id}"))
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_missing_post_is_empty_404() {
    let state = test_state();
    let token = bearer(&state, "root@root.com").await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/postagens/999")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_rt::test]
async fn test_post_with_unknown_theme_is_rejected() {
    let state = test_state();
    let token = bearer(&state, "root@root.com").await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/postagens")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({
            "titulo": "Postagem órfã",
            "texto": "Este texto aponta para um tema inexistente.",
            "tema": { "id": 42 }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "O tema não existe!");
}

#[actix_rt::test]
async fn test_invalid_post_lists_fields() {
    let state = test_state();
    let token = bearer(&state, "root@root.com").await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/postagens")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({ "titulo": "abc", "texto": "curto" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let names: Vec<&str> = body["invalid-params"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"titulo"));
    assert!(names.contains(&"texto"));
    assert!(names.contains(&"tema"));
}

#[actix_rt::test]
async fn test_update_without_id_is_rejected() {
    let state = test_state();
    let token = bearer(&state, "root@root.com").await;
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri("/temas")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({ "descricao": "Tema sem identificador" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["invalid-params"][0]["name"], "id");
}

#[actix_rt::test]
async fn test_malformed_json_is_problem_details() {
    let state = test_state();
    let token = bearer(&state, "root@root.com").await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/temas")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ \"descricao\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[actix_rt::test]
async fn test_title_search_ignores_case() {
    let state = test_state();
    let token = bearer(&state, "root@root.com").await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/temas")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({ "descricao": "Linguagens de programação" }))
        .to_request();
    let theme: Value = test::read_body_json(test::call_service(&app, req).await).await;

    for title in ["Aprendendo RUST", "Receitas de bolo"] {
        let req = test::TestRequest::post()
            .uri("/postagens")
            .insert_header((header::AUTHORIZATION, token.as_str()))
            .set_json(json!({
                "titulo": title,
                "texto": "Um texto com tamanho suficiente.",
                "tema": { "id": theme["id"] }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/postagens/titulo/rust")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let found: Value = test::read_body_json(test::call_service(&app, req).await).await;

    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["titulo"], "Aprendendo RUST");
}

#[actix_rt::test]
async fn test_theme_lists_its_posts() {
    let state = test_state();
    let token = bearer(&state, "root@root.com").await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/temas")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({ "descricao": "Programação em Rust" }))
        .to_request();
    let theme: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(theme.get("postagem").is_none());

    let req = test::TestRequest::post()
        .uri("/postagens")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({
            "titulo": "Ownership na prática",
            "texto": "Quem é dono de cada valor, e quando.",
            "tema": { "id": theme["id"] }
        }))
        .to_request();
    let post: Value = test::read_body_json(test::call_service(&app, req).await).await;

    let req = test::TestRequest::get()
        .uri(&format!("/temas/{}", theme["id"]))
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let listed = body["postagem"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], post["id"]);
    assert_eq!(listed[0]["titulo"], "Ownership na prática");
}

#[actix_rt::test]
async fn test_theme_delete_takes_posts() {
    let state = test_state();
    let token = bearer(&state, "root@root.com").await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/temas")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({ "descricao": "Tema passageiro" }))
        .to_request();
    let theme: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let theme_id = theme["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/postagens")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({
            "titulo": "Postagem do tema",
            "texto": "Será removida junto com o tema.",
            "tema": { "id": theme_id }
        }))
        .to_request();
    let post: Value = test::read_body_json(test::call_service(&app, req).await).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/temas/{theme_id}"))
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/postagens/{}", post["id"]))
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_register_and_login() {
    let state = test_state();
    let app = app!(state);

    let account = json!({
        "nome": "Maria",
        "usuario": "maria@blog.com",
        "senha": "senha-secreta",
        "foto": ""
    });

    let req = test::TestRequest::post()
        .uri("/usuarios/cadastrar")
        .set_json(&account)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert!(created.get("senha").is_none());
    assert_eq!(created["foto"], Value::Null);

    let req = test::TestRequest::post()
        .uri("/usuarios/cadastrar")
        .set_json(&account)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "O usuário já existe!");

    let req = test::TestRequest::post()
        .uri("/usuarios/logar")
        .set_json(json!({ "usuario": "maria@blog.com", "senha": "senha-secreta" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let session: Value = test::read_body_json(resp).await;
    let token = session["token"].as_str().unwrap().to_string();
    assert!(token.starts_with("Bearer "));
    assert_eq!(session["id"], created["id"]);

    let req = test::TestRequest::get()
        .uri("/usuarios/all")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_update_account() {
    let state = test_state();
    let token = bearer(&state, "myriam@email.com.br").await;
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri("/usuarios/atualizar")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .set_json(json!({
            "id": 1,
            "nome": "Myriam Souza",
            "usuario": "myriam@email.com",
            "senha": "nova-senha-123",
            "foto": "https://i.imgur.com/myriam.jpg"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["nome"], "Myriam Souza");
    assert_eq!(body["usuario"], "myriam@email.com");
    assert!(body.get("senha").is_none());

    let req = test::TestRequest::post()
        .uri("/usuarios/logar")
        .set_json(json!({ "usuario": "myriam@email.com", "senha": "nova-senha-123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_login_failures_are_unauthorized() {
    let state = test_state();
    bearer(&state, "root@root.com").await;
    let app = app!(state);

    for (login, password) in [
        ("root@root.com", "wrong-password"),
        ("ghost@root.com", "rootroot"),
        ("", "rootroot"),
    ] {
        let req = test::TestRequest::post()
            .uri("/usuarios/logar")
            .set_json(json!({ "usuario": login, "senha": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{login}");
    }
}

#[actix_rt::test]
async fn test_deleted_user_token_stops_working() {
    let state = test_state();
    let token = bearer(&state, "root@root.com").await;
    let app = app!(state);

    let req = test::TestRequest::delete()
        .uri("/usuarios/1")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/temas")
        .insert_header((header::AUTHORIZATION, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_cors_preflight_from_allowed_origin() {
    let state = test_state();
    let cors = CorsConfig::default();
    let app = test::init_service(
        App::new()
            .wrap(build_cors(&cors))
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/postagens")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}
