//! Liveness endpoint reporting on the post store.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use quill_core::domain::PostFilter;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `"postgres"` or `"in-memory"`.
    pub persistence: &'static str,
    /// Posts reachable through the backing repository.
    pub post_count: usize,
    pub timestamp: String,
}

/// GET /api/health
///
/// Probes the repository with an unscoped list. A repository failure turns
/// the status to `"degraded"` rather than failing the endpoint.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, post_count) = match state.posts.list(&PostFilter::new()).await {
        Ok(posts) => ("ok", posts.len()),
        Err(err) => {
            tracing::warn!(%err, "Health probe failed to reach the repository");
            ("degraded", 0)
        }
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        persistence: state.persistence,
        post_count,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};

    use quill_core::domain::Post;
    use quill_core::ports::BlobStorage;

    use super::*;
    use crate::handlers::configure_routes;
    use crate::state::tests::memory_state;

    #[actix_web::test]
    async fn test_health_reports_persistence_and_count() {
        let state = memory_state();
        let image = state
            .storage
            .store(vec![1, 2, 3], "cover.png", "image/png")
            .await
            .unwrap();
        let mut post = Post::new(
            "First Post",
            "A summary",
            "Some content",
            "rust",
            "Ada",
            "ada@example.com",
        );
        post.attach_cover_image(image);
        state.posts.save(post).await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["persistence"], "in-memory");
        assert_eq!(body["post_count"], 1);
    }
}
