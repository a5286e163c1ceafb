//! Ports - trait definitions for external collaborators.
//! These are the "interfaces" that infrastructure must implement.

mod markdown;
mod repository;
mod search;
mod slugs;
mod storage;

pub use markdown::{MarkdownRenderer, RenderContext, TocEntry};
pub use repository::PostRepository;
pub use search::{SearchError, SearchIndex};
pub use slugs::{SlugError, SlugService};
pub use storage::{BlobStorage, Disposition, RenditionError, StorageError};
