//! Post orchestration - the save pipeline and read-side operations.
//!
//! The service wires the entity to its collaborators. Saving runs an explicit
//! ordered pipeline: validate, recompute reading time, assign the slug,
//! persist, index. Nothing is written when validation fails.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostFilter, Variant, VariantSpec};
use crate::error::DomainError;
use crate::ports::{
    BlobStorage, Disposition, MarkdownRenderer, PostRepository, RenderContext, SearchIndex,
    SlugError, SlugService, TocEntry,
};
use crate::text_stats;
use crate::validation;

/// Sentinel URL returned when no image is attached or a rendition cannot be
/// produced. Presentation helpers never raise.
pub const MISSING_IMAGE_URL: &str = "#";

/// Default heading depth for tables of contents.
pub const DEFAULT_TOC_DEPTH: u8 = 2;

/// Application service for posts.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    search: Arc<dyn SearchIndex>,
    slugs: Arc<dyn SlugService>,
    storage: Arc<dyn BlobStorage>,
    renderer: Arc<dyn MarkdownRenderer>,
    /// Reading speed in words per second.
    reading_speed: f64,
}

impl PostService {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        search: Arc<dyn SearchIndex>,
        slugs: Arc<dyn SlugService>,
        storage: Arc<dyn BlobStorage>,
        renderer: Arc<dyn MarkdownRenderer>,
        reading_speed: f64,
    ) -> Self {
        Self {
            repo,
            search,
            slugs,
            storage,
            renderer,
            reading_speed,
        }
    }

    pub fn storage(&self) -> &Arc<dyn BlobStorage> {
        &self.storage
    }

    /// Validate and persist a post.
    ///
    /// Pipeline order:
    /// 1. validation - any failure aborts with no side effects;
    /// 2. reading-time recomputation - unconditional, overwrites whatever the
    ///    caller set, even when the content did not change;
    /// 3. slug assignment - on first save and whenever the title changed;
    ///    the previous slug stops resolving;
    /// 4. persistence (unique-slug constraint enforced by the repository);
    /// 5. search indexing of title and content.
    pub async fn save(&self, mut post: Post) -> Result<Post, DomainError> {
        validation::validate(&post).map_err(DomainError::Validation)?;

        post.reading_time = text_stats::reading_time(&post.content, self.reading_speed);

        let previous = self.repo.find_by_id(post.id).await?;
        let needs_slug = match &previous {
            None => true,
            Some(prev) => prev.title != post.title || post.slug.is_empty(),
        };
        if needs_slug {
            let current = previous.as_ref().map(|p| p.slug.as_str());
            post.slug = self.slugs.unique_slug(&post.title, current).await?;
        }

        post.updated_at = chrono::Utc::now();
        let saved = self.repo.save(post).await?;

        self.search
            .index(saved.id, &saved.title, &saved.content)
            .await?;

        tracing::debug!(post_id = %saved.id, slug = %saved.slug, "Post saved");
        Ok(saved)
    }

    /// Look a post up by UUID or current slug.
    ///
    /// A string that parses as a UUID is treated as an ID; anything else is
    /// a slug lookup. Slugs from earlier titles return NotFound.
    pub async fn find(&self, id_or_slug: &str) -> Result<Post, DomainError> {
        let found = match Uuid::parse_str(id_or_slug) {
            Ok(id) => self.repo.find_by_id(id).await?,
            Err(_) => self.repo.find_by_slug(id_or_slug).await?,
        };
        found.ok_or_else(|| DomainError::not_found("post", id_or_slug))
    }

    pub async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list(filter).await?)
    }

    /// Posts whose title or content matches the query, ranked best first.
    pub async fn search(&self, query: &str) -> Result<Vec<Post>, DomainError> {
        let ids = self.search.search(query).await?;
        let mut posts = Vec::with_capacity(ids.len());
        for id in ids {
            // Index entries may lag deletes; skip dangling ids.
            if let Some(post) = self.repo.find_by_id(id).await? {
                posts.push(post);
            }
        }
        Ok(posts)
    }

    /// Delete a post and drop it from the search index.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        self.search.remove(id).await?;
        Ok(())
    }

    // --- Presentation helpers ---

    /// Render the post's markdown content to HTML.
    pub fn render(&self, post: &Post, context: &RenderContext) -> String {
        self.renderer.to_html(&post.content, context)
    }

    /// Table of contents over the post's content, headings <= `depth`.
    pub fn render_toc(&self, post: &Post, depth: u8) -> Vec<TocEntry> {
        self.renderer.toc(&post.content, depth)
    }

    /// Relative URL of the original cover image, or `"#"` when none is
    /// attached.
    pub fn cover_image_path(&self, post: &Post) -> String {
        match &post.cover_image {
            Some(image) => self.storage.blob_url(image, Disposition::Attachment, false),
            None => MISSING_IMAGE_URL.to_string(),
        }
    }

    /// Absolute URL of the original cover image, or `"#"`.
    pub fn cover_image_url(&self, post: &Post) -> String {
        match &post.cover_image {
            Some(image) => self.storage.blob_url(image, Disposition::Attachment, true),
            None => MISSING_IMAGE_URL.to_string(),
        }
    }

    /// Relative URL of a named rendition. Fail-soft: a missing attachment or
    /// an unrenderable source both map to `"#"`.
    pub fn cover_image_variant_path(&self, post: &Post, variant: Variant) -> String {
        self.variant_url_or_sentinel(post, &variant.spec(), false)
    }

    /// Absolute URL of a parameterised rendition. Same fail-soft contract.
    pub fn cover_image_variant_url(&self, post: &Post, spec: &VariantSpec) -> String {
        self.variant_url_or_sentinel(post, spec, true)
    }

    fn variant_url_or_sentinel(&self, post: &Post, spec: &VariantSpec, absolute: bool) -> String {
        let Some(image) = &post.cover_image else {
            return MISSING_IMAGE_URL.to_string();
        };
        match self.storage.variant_url(image, spec, absolute) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!(key = %image.key, %err, "Rendition unavailable");
                MISSING_IMAGE_URL.to_string()
            }
        }
    }
}

impl From<SlugError> for DomainError {
    fn from(err: SlugError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

impl From<crate::ports::SearchError> for DomainError {
    fn from(err: crate::ports::SearchError) -> Self {
        DomainError::Internal(err.to_string())
    }
}
