use async_trait::async_trait;
use uuid::Uuid;

/// Full-text search index over post titles and content.
///
/// Matching and ranking semantics belong to the implementation; the domain
/// only declares which fields are searchable.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Index (or re-index) a post's searchable fields.
    async fn index(&self, id: Uuid, title: &str, content: &str) -> Result<(), SearchError>;

    /// Drop a post from the index.
    async fn remove(&self, id: Uuid) -> Result<(), SearchError>;

    /// IDs of posts whose title or content matches the query, best first.
    async fn search(&self, query: &str) -> Result<Vec<Uuid>, SearchError>;
}

/// Search index operation errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Index unavailable: {0}")]
    Unavailable(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
