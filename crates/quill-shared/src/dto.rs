//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// A cover image sent inline as base64 (optionally a `data:` URL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverImageUpload {
    pub filename: String,
    pub content_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub topic: String,
    pub author_name: String,
    pub author_email: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub published: bool,
    pub cover_image: Option<CoverImageUpload>,
}

/// Partial update of a post. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub topic: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    pub cover_image: Option<CoverImageUpload>,
}

/// Query parameters for listing posts. Scopes AND together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub featured: Option<bool>,
    pub published: Option<bool>,
    pub topic: Option<String>,
    pub author: Option<String>,
}

/// Query parameters for full-text search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Query parameters for the table-of-contents endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TocQuery {
    pub depth: Option<u8>,
}

/// A post as returned by the API, presentation URLs included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub topic: String,
    pub author_name: String,
    pub author_email: String,
    pub featured: bool,
    pub published: bool,
    pub reading_time: f64,
    pub gravatar_url: String,
    /// `"#"` when no image is attached.
    pub cover_image_url: String,
    pub cover_image_path: String,
    pub thumbnail_path: String,
    pub featured_image_path: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Rendered markdown content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedPostResponse {
    pub id: String,
    pub html: String,
}
