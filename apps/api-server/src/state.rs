//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::PostRepository;
use quill_infra::{
    CmarkRenderer, InMemoryBlobStorage, InMemoryPostRepository, InMemorySearchIndex,
    RepositorySlugService,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Kept alongside the service so the blob serve handler can read bytes.
    pub storage: Arc<InMemoryBlobStorage>,
    /// Which repository backs the service: `"postgres"` or `"in-memory"`.
    pub persistence: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (repo, persistence) = Self::repository(config).await;
        let storage = Arc::new(InMemoryBlobStorage::new(config.public_base_url.clone()));

        let posts = PostService::new(
            repo.clone(),
            Arc::new(InMemorySearchIndex::new()),
            Arc::new(RepositorySlugService::new(repo)),
            storage.clone(),
            Arc::new(CmarkRenderer::new()),
            config.reading_speed,
        );

        tracing::info!(persistence, "Application state initialized");
        Self {
            posts,
            storage,
            persistence,
        }
    }

    #[cfg(feature = "postgres")]
    async fn repository(config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        use quill_infra::database::{DatabaseConfig, PostgresPostRepository, connect};

        let Some(url) = &config.database_url else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (Arc::new(InMemoryPostRepository::new()), "in-memory");
        };

        let db_config = DatabaseConfig {
            url: url.clone(),
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
        };
        match connect(&db_config).await {
            Ok(conn) => (Arc::new(PostgresPostRepository::new(conn)), "postgres"),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (Arc::new(InMemoryPostRepository::new()), "in-memory")
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repository(_config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        tracing::info!("Running without postgres feature - using in-memory repository");
        (Arc::new(InMemoryPostRepository::new()), "in-memory")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fully in-memory state for handler tests.
    pub(crate) fn memory_state() -> AppState {
        let repo: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        let storage = Arc::new(InMemoryBlobStorage::new("http://localhost:8080"));
        let posts = PostService::new(
            repo.clone(),
            Arc::new(InMemorySearchIndex::new()),
            Arc::new(RepositorySlugService::new(repo)),
            storage.clone(),
            Arc::new(CmarkRenderer::new()),
            4.1,
        );
        AppState {
            posts,
            storage,
            persistence: "in-memory",
        }
    }
}
