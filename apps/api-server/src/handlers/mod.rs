//! HTTP handlers and route configuration.

mod health;
mod posts;
mod storage;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create))
                    .route("", web::get().to(posts::list))
                    .route("/search", web::get().to(posts::search))
                    .route("/{id_or_slug}", web::get().to(posts::show))
                    .route("/{id_or_slug}", web::put().to(posts::update))
                    .route("/{id_or_slug}", web::delete().to(posts::delete))
                    .route(
                        "/{id_or_slug}/cover-image",
                        web::post().to(posts::upload_cover_image),
                    )
                    .route("/{id_or_slug}/html", web::get().to(posts::html))
                    .route("/{id_or_slug}/toc", web::get().to(posts::toc)),
            ),
    )
    // Blob serving lives outside /api so stored URLs stay short.
    .route("/storage/{key}", web::get().to(storage::serve_blob))
    .route(
        "/storage/{key}/variants/{spec}",
        web::get().to(storage::serve_variant),
    );
}
