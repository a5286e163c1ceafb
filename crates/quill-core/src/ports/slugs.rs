use async_trait::async_trait;

/// Slug generation - turns a title into a unique URL-safe identifier.
#[async_trait]
pub trait SlugService: Send + Sync {
    /// Produce a unique slug for `source`, suffixing deterministically on
    /// collision. `current` is the slug the post already holds, so a post
    /// never collides with itself on re-save.
    async fn unique_slug(&self, source: &str, current: Option<&str>) -> Result<String, SlugError>;
}

/// Slug generation errors.
#[derive(Debug, thiserror::Error)]
pub enum SlugError {
    #[error("Slug source produced no usable characters")]
    EmptySource,

    #[error("Uniqueness probe failed: {0}")]
    Probe(String),
}
