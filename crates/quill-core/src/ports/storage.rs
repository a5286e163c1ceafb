use async_trait::async_trait;

use crate::domain::{CoverImage, VariantSpec};

/// How a served blob asks the browser to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        }
    }
}

/// Blob storage and variant rendering for cover images.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store a binary and return the attachment reference for it.
    async fn store(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<CoverImage, StorageError>;

    /// Remove a stored blob. Unknown keys are a no-op.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// URL for the original blob. Relative path unless `absolute`.
    fn blob_url(&self, image: &CoverImage, disposition: Disposition, absolute: bool) -> String;

    /// URL for a derived rendition of the blob.
    ///
    /// Sources that cannot produce renditions (non-image content types)
    /// yield `RenditionError::Invariable`.
    fn variant_url(
        &self,
        image: &CoverImage,
        spec: &VariantSpec,
        absolute: bool,
    ) -> Result<String, RenditionError>;
}

/// Storage operation errors. These propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Write failed: {0}")]
    Write(String),
}

/// A requested rendition cannot be produced for this blob.
///
/// Consumed fail-soft by presentation helpers - never surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum RenditionError {
    #[error("Cannot produce variants for content type {0}")]
    Invariable(String),
}
