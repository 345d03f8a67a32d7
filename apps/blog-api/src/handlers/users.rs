//! Account handlers: registration, login and profile management.

use actix_web::{HttpResponse, web};

use blog_core::domain::{User, UserInput};
use blog_core::services::Credentials;
use blog_shared::dto::{LoginRequest, LoginResponse, UserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_input(req: UserRequest) -> UserInput {
    UserInput {
        id: req.id,
        name: req.name,
        login: req.login,
        password: req.password,
        photo: req.photo,
    }
}

fn to_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name,
        login: user.login,
        photo: user.photo,
    }
}

/// POST /usuarios/cadastrar
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let user = state.users.register(to_input(body.into_inner())).await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(HttpResponse::Created().json(to_response(user)))
}

/// POST /usuarios/logar
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let session = state
        .auth
        .login(Credentials {
            login: req.login,
            password: req.password,
        })
        .await?;

    tracing::info!(user_id = session.user.id, "User logged in");

    let user = session.user;
    Ok(HttpResponse::Ok().json(LoginResponse {
        id: user.id,
        name: user.name,
        login: user.login,
        photo: user.photo,
        token: format!("Bearer {}", session.token),
        token_type: "Bearer".to_string(),
        expires_in: session.expires_in.max(0) as u64,
    }))
}

/// GET /usuarios/all
pub async fn list(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.list().await?;
    Ok(HttpResponse::Ok().json(users.into_iter().map(to_response).collect::<Vec<_>>()))
}

/// GET /usuarios/{id}
pub async fn get_by_id(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let user = state.users.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(user)))
}

/// PUT /usuarios/atualizar
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let user = state.users.update(to_input(body.into_inner())).await?;

    tracing::info!(user_id = user.id, by = identity.user_id, "User updated");
    Ok(HttpResponse::Ok().json(to_response(user)))
}

/// DELETE /usuarios/{id}. The user's posts stay, without an author.
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.users.delete(id).await?;

    tracing::info!(user_id = id, by = identity.user_id, "User deleted");
    Ok(HttpResponse::NoContent().finish())
}
