//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the database repository, search index, slug service,
//! blob storage, and markdown renderer.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL persistence via SeaORM
//!
//! Without `postgres` everything runs in-memory, which is also what the
//! integration tests wire up.

#[cfg(feature = "postgres")]
pub mod database;
pub mod markdown;
pub mod repository;
pub mod search;
pub mod slugs;
pub mod storage;

pub use markdown::CmarkRenderer;
pub use repository::InMemoryPostRepository;
pub use search::InMemorySearchIndex;
pub use slugs::RepositorySlugService;
pub use storage::InMemoryBlobStorage;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresPostRepository, connect};
