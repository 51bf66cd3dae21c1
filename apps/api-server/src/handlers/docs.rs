//! OpenAPI document for the post endpoints.

use actix_web::HttpResponse;
use utoipa::OpenApi;

use quill_shared::{ErrorResponse, PostRequest, PostResponse, ValidationErrors};

use super::posts;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Quill API", description = "Blog post CRUD"),
    paths(
        posts::create_post,
        posts::list_posts,
        posts::get_post,
        posts::update_post,
        posts::delete_post,
    ),
    components(schemas(PostRequest, PostResponse, ErrorResponse, ValidationErrors)),
    tags((name = "posts", description = "Create, read, update, delete and search blog posts"))
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
