//! Cover image attachment value objects.

use serde::{Deserialize, Serialize};

/// Content types a cover image may carry and still pass validation.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Reference to an attached cover image blob.
///
/// The binary itself lives in blob storage; the post only carries the key
/// and enough metadata to validate and build URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverImage {
    /// Storage key of the blob.
    pub key: String,
    pub filename: String,
    pub content_type: String,
    pub byte_size: u64,
}

impl CoverImage {
    pub fn new(
        key: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        byte_size: u64,
    ) -> Self {
        Self {
            key: key.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            byte_size,
        }
    }

    pub fn is_allowed_type(&self) -> bool {
        ALLOWED_IMAGE_TYPES.contains(&self.content_type.as_str())
    }
}

/// Named derived renditions of a cover image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Thumbnail,
    Featured,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Thumbnail => "thumbnail",
            Variant::Featured => "featured",
        }
    }

    /// Rendering parameters for the named rendition.
    pub fn spec(&self) -> VariantSpec {
        match self {
            Variant::Thumbnail => VariantSpec::fill(400, 200),
            Variant::Featured => VariantSpec::fill(440, 300),
        }
    }
}

/// Parameters for a derived rendition: target size plus whether the source
/// is cropped to fill it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub width: u32,
    pub height: u32,
    pub crop: bool,
}

impl VariantSpec {
    pub fn fill(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            crop: true,
        }
    }

    pub fn fit(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            crop: false,
        }
    }
}
