use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attachment::CoverImage;

/// Default pixel size for gravatar URLs.
pub const DEFAULT_AVATAR_SIZE: u32 = 32;

/// Post entity - a single blog post.
///
/// `slug` and `reading_time` are derived state: both are assigned by the save
/// pipeline and never authoritative when set by a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub topic: String,
    pub author_name: String,
    pub author_email: String,
    pub featured: bool,
    pub published: bool,
    /// Estimated minutes to read `content`. Recomputed on every save.
    pub reading_time: f64,
    pub cover_image: Option<CoverImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new unpublished post with generated ID and timestamps.
    ///
    /// The slug and reading time stay empty/zero until the first save.
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        content: impl Into<String>,
        topic: impl Into<String>,
        author_name: impl Into<String>,
        author_email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: String::new(),
            title: title.into(),
            summary: summary.into(),
            content: content.into(),
            topic: topic.into(),
            author_name: author_name.into(),
            author_email: author_email.into(),
            featured: false,
            published: false,
            reading_time: 0.0,
            cover_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a cover image, replacing any existing one (at most one per post).
    pub fn attach_cover_image(&mut self, image: CoverImage) {
        self.cover_image = Some(image);
    }

    pub fn detach_cover_image(&mut self) {
        self.cover_image = None;
    }

    pub fn has_cover_image(&self) -> bool {
        self.cover_image.is_some()
    }

    /// Gravatar URL for the author, hashed from the lowercased email.
    ///
    /// Pure URL construction - no network call, no check that the avatar
    /// actually exists.
    pub fn gravatar(&self, size: u32) -> String {
        let digest = Md5::digest(self.author_email.trim().to_lowercase().as_bytes());
        format!(
            "https://gravatar.com/avatar/{}.png?s={}",
            hex::encode(digest),
            size
        )
    }
}
