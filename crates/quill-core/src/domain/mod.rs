//! Domain entities - the core business objects.

mod attachment;
mod filter;
mod post;

pub use attachment::{CoverImage, Variant, VariantSpec};
pub use filter::PostFilter;
pub use post::{DEFAULT_AVATAR_SIZE, Post};
