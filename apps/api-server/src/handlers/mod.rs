//! HTTP handlers and route configuration.

mod docs;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler, query_error_handler};

use posts::POSTS_PATH;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .route("/health", web::get().to(health::health_check))
        .route(docs::OPENAPI_PATH, web::get().to(docs::openapi_json))
        .service(
            web::scope(POSTS_PATH)
                .service(
                    web::resource("")
                        .route(web::get().to(posts::list_posts))
                        .route(web::post().to(posts::create_post)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(posts::get_post))
                        .route(web::put().to(posts::update_post))
                        .route(web::delete().to(posts::delete_post)),
                ),
        );
}
