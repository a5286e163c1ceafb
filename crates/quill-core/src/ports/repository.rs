use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostFilter};
use crate::error::RepoError;

/// Post repository - abstraction over the persistence backend.
///
/// Uniqueness of `slug` is enforced here: `save` must fail with
/// `RepoError::Constraint` when another post already holds the slug.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Find a post by its current slug. Stale slugs from earlier titles do
    /// not resolve.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Whether any post currently holds the slug.
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError>;

    /// Save a post (create or update).
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post by its ID.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// List posts matching the filter, newest first.
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;
}
