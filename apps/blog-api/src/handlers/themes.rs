//! Theme handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{Theme, ThemeInput};
use blog_shared::dto::{ThemeRequest, ThemeResponse};

use super::posts;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_input(req: ThemeRequest) -> ThemeInput {
    ThemeInput {
        id: req.id,
        description: req.description,
    }
}

fn to_response(theme: Theme) -> ThemeResponse {
    ThemeResponse {
        id: theme.id,
        description: theme.description,
        posts: None,
    }
}

/// GET /temas
pub async fn list(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let themes = state.themes.list().await?;
    Ok(HttpResponse::Ok().json(themes.into_iter().map(to_response).collect::<Vec<_>>()))
}

/// GET /temas/{id}. Includes the theme's posts as `postagem`.
pub async fn get_by_id(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let found = state.themes.get_with_posts(path.into_inner()).await?;

    let mut response = to_response(found.theme);
    response.posts = Some(posts::to_responses(found.posts));
    Ok(HttpResponse::Ok().json(response))
}

/// GET /temas/descricao/{descricao}
pub async fn list_by_description(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let themes = state.themes.search_by_description(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(themes.into_iter().map(to_response).collect::<Vec<_>>()))
}

/// POST /temas
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<ThemeRequest>,
) -> AppResult<HttpResponse> {
    let theme = state.themes.create(to_input(body.into_inner())).await?;

    tracing::info!(theme_id = theme.id, user_id = identity.user_id, "Theme created");
    Ok(HttpResponse::Created().json(to_response(theme)))
}

/// PUT /temas
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<ThemeRequest>,
) -> AppResult<HttpResponse> {
    let theme = state.themes.update(to_input(body.into_inner())).await?;

    tracing::info!(theme_id = theme.id, user_id = identity.user_id, "Theme updated");
    Ok(HttpResponse::Ok().json(to_response(theme)))
}

/// DELETE /temas/{id}. Takes the theme's posts with it.
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let removed_posts = state.themes.delete(id).await?;

    tracing::info!(
        theme_id = id,
        removed_posts,
        user_id = identity.user_id,
        "Theme deleted"
    );
    Ok(HttpResponse::NoContent().finish())
}
