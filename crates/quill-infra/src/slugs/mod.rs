//! Slug generation backed by the `slug` crate plus repository probing for
//! uniqueness.

use std::sync::Arc;

use async_trait::async_trait;

use quill_core::ports::{PostRepository, SlugError, SlugService};

/// Upper bound on suffix probing. A collision run this long means something
/// is wrong with the data, not the titles.
const MAX_SUFFIX: u32 = 10_000;

/// URL-safe slug of a title, no uniqueness applied.
pub fn slugify(source: &str) -> String {
    slug::slugify(source)
}

/// `SlugService` that resolves collisions by probing the repository with
/// deterministic numeric suffixes: `my-title`, `my-title-2`, `my-title-3`, ...
pub struct RepositorySlugService {
    repo: Arc<dyn PostRepository>,
}

impl RepositorySlugService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SlugService for RepositorySlugService {
    async fn unique_slug(&self, source: &str, current: Option<&str>) -> Result<String, SlugError> {
        let base = slugify(source);
        if base.is_empty() || base == "-" {
            return Err(SlugError::EmptySource);
        }

        let mut candidate = base.clone();
        let mut n = 2;
        loop {
            if Some(candidate.as_str()) == current {
                return Ok(candidate);
            }
            let taken = self
                .repo
                .slug_exists(&candidate)
                .await
                .map_err(|e| SlugError::Probe(e.to_string()))?;
            if !taken {
                return Ok(candidate);
            }
            if n > MAX_SUFFIX {
                return Err(SlugError::Probe(format!(
                    "no free slug for '{base}' within {MAX_SUFFIX} candidates"
                )));
            }
            candidate = format!("{base}-{n}");
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryPostRepository;
    use quill_core::domain::Post;
    use quill_core::ports::PostRepository as _;

    async fn seed(repo: &InMemoryPostRepository, slug: &str) {
        let mut post = Post::new("T", "S", "C", "rust", "Ada", "ada@example.com");
        post.slug = slug.to_string();
        repo.save(post).await.unwrap();
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Ünïcode Tîtle  "), "unicode-title");
    }

    #[tokio::test]
    async fn test_free_slug_untouched() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let service = RepositorySlugService::new(repo);
        let slug = service.unique_slug("My Title", None).await.unwrap();
        assert_eq!(slug, "my-title");
    }

    #[tokio::test]
    async fn test_collisions_suffix_deterministically() {
        let repo = Arc::new(InMemoryPostRepository::new());
        seed(&repo, "my-title").await;
        seed(&repo, "my-title-2").await;

        let service = RepositorySlugService::new(repo);
        let slug = service.unique_slug("My Title", None).await.unwrap();
        assert_eq!(slug, "my-title-3");
    }

    #[tokio::test]
    async fn test_own_slug_is_not_a_collision() {
        let repo = Arc::new(InMemoryPostRepository::new());
        seed(&repo, "my-title").await;

        let service = RepositorySlugService::new(repo);
        let slug = service
            .unique_slug("My Title", Some("my-title"))
            .await
            .unwrap();
        assert_eq!(slug, "my-title");
    }

    #[tokio::test]
    async fn test_unusable_source_is_an_error() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let service = RepositorySlugService::new(repo);
        assert!(matches!(
            service.unique_slug("!!!", None).await,
            Err(SlugError::EmptySource)
        ));
    }
}
