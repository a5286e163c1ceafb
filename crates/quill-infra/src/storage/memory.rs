//! In-memory blob storage serving `/storage/...` URLs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{CoverImage, VariantSpec};
use quill_core::ports::{BlobStorage, Disposition, RenditionError, StorageError};

struct StoredBlob {
    bytes: Vec<u8>,
    content_type: String,
}

/// Blob store keyed by UUID, with URL building for originals and variants.
///
/// Variant URLs encode the rendering parameters; actual resizing happens at
/// serve time (out of scope here - the serve handler returns the original).
/// Note: blobs are lost on process restart.
pub struct InMemoryBlobStorage {
    /// Base for absolute URLs, e.g. `http://localhost:8080`. No trailing slash.
    public_base_url: String,
    blobs: RwLock<HashMap<String, StoredBlob>>,
}

impl InMemoryBlobStorage {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        let mut base = public_base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            public_base_url: base,
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch raw bytes and content type, for the serve handler.
    pub async fn get(&self, key: &str) -> Option<(Vec<u8>, String)> {
        let blobs = self.blobs.read().await;
        blobs
            .get(key)
            .map(|b| (b.bytes.clone(), b.content_type.clone()))
    }

    /// Number of blobs currently held.
    pub async fn blob_count(&self) -> usize {
        self.blobs.read().await.len()
    }

    fn absolutize(&self, path: String, absolute: bool) -> String {
        if absolute {
            format!("{}{}", self.public_base_url, path)
        } else {
            path
        }
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn store(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<CoverImage, StorageError> {
        let key = Uuid::new_v4().to_string();
        let byte_size = bytes.len() as u64;

        self.blobs.write().await.insert(
            key.clone(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );

        tracing::debug!(%key, content_type, byte_size, "Blob stored");
        Ok(CoverImage::new(key, filename, content_type, byte_size))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        if self.blobs.write().await.remove(key).is_some() {
            tracing::debug!(%key, "Blob deleted");
        }
        Ok(())
    }

    fn blob_url(&self, image: &CoverImage, disposition: Disposition, absolute: bool) -> String {
        let path = format!(
            "/storage/{}?disposition={}",
            image.key,
            disposition.as_str()
        );
        self.absolutize(path, absolute)
    }

    fn variant_url(
        &self,
        image: &CoverImage,
        spec: &VariantSpec,
        absolute: bool,
    ) -> Result<String, RenditionError> {
        // Only raster images can be rendered into variants.
        if !image.content_type.starts_with("image/") {
            return Err(RenditionError::Invariable(image.content_type.clone()));
        }

        let mode = if spec.crop { "fill" } else { "fit" };
        let path = format!(
            "/storage/{}/variants/{}x{}-{}",
            image.key, spec.width, spec.height, mode
        );
        Ok(self.absolutize(path, absolute))
    }
}
