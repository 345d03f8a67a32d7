//! Post handlers. Every route requires a bearer token.

use actix_web::{HttpResponse, web};

use blog_core::domain::{Post, PostInput};
use blog_shared::dto::{EntityRef, PostRequest, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_input(req: PostRequest) -> PostInput {
    PostInput {
        id: req.id,
        title: req.title,
        body: req.body,
        theme_id: req.theme.map(|t| t.id),
        user_id: req.user.map(|u| u.id),
    }
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        body: post.body,
        updated_at: post.updated_at,
        theme: EntityRef { id: post.theme_id },
        user: post.user_id.map(|id| EntityRef { id }),
    }
}

pub(super) fn to_responses(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(to_response).collect()
}

/// GET /postagens
pub async fn list(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    Ok(HttpResponse::Ok().json(to_responses(posts)))
}

/// GET /postagens/{id}
pub async fn get_by_id(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// GET /postagens/titulo/{titulo}
pub async fn list_by_title(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.search_by_title(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_responses(posts)))
}

/// POST /postagens
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(to_input(body.into_inner())).await?;

    tracing::info!(post_id = post.id, user_id = identity.user_id, "Post created");
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /postagens
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.update(to_input(body.into_inner())).await?;

    tracing::info!(post_id = post.id, user_id = identity.user_id, "Post updated");
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /postagens/{id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;

    tracing::info!(post_id = id, user_id = identity.user_id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
