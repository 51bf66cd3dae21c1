//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::IntoParams;

use quill_core::domain::PostId;
use quill_shared::{ErrorResponse, PostRequest, PostResponse, ValidationErrors};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Collection path for posts.
pub const POSTS_PATH: &str = "/posts";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Substring matched against title, content and category.
    pub term: Option<String>,
}

/// POST /posts
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid fields", body = ValidationErrors),
    )
)]
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let created = state.posts.create(&req).await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /posts?term=...
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching posts", body = [PostResponse]),
    )
)]
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(query.term.as_deref()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/{id}
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 404, description = "No post with this ID", body = ErrorResponse),
    )
)]
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /posts/{id}
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Invalid fields", body = ValidationErrors),
        (status = 404, description = "No post with this ID", body = ErrorResponse),
    )
)]
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let updated = state.posts.update(&req, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /posts/{id}
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted, or it never existed"),
    )
)]
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
