//! Read-side filtering scopes over the post collection.

use serde::{Deserialize, Serialize};

use super::post::Post;

/// Declarative filter over persisted posts.
///
/// Scopes compose by logical AND when chained; there is no OR composition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFilter {
    pub featured: Option<bool>,
    pub published: Option<bool>,
    pub topic: Option<String>,
    pub author_name: Option<String>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn featured(mut self) -> Self {
        self.featured = Some(true);
        self
    }

    pub fn published(mut self) -> Self {
        self.published = Some(true);
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = Some(false);
        self
    }

    pub fn tagged_with(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn authored_by(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    /// Whether a post satisfies every chained scope.
    pub fn matches(&self, post: &Post) -> bool {
        self.featured.is_none_or(|f| post.featured == f)
            && self.published.is_none_or(|p| post.published == p)
            && self.topic.as_deref().is_none_or(|t| post.topic == t)
            && self
                .author_name
                .as_deref()
                .is_none_or(|n| post.author_name == n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(topic: &str, featured: bool, published: bool) -> Post {
        let mut p = Post::new("T", "S", "C", topic, "Ada", "ada@example.com");
        p.featured = featured;
        p.published = published;
        p
    }

    #[test]
    fn test_tagged_with_ignores_flags() {
        let filter = PostFilter::new().tagged_with("ruby");
        assert!(filter.matches(&post("ruby", true, false)));
        assert!(filter.matches(&post("ruby", false, true)));
        assert!(!filter.matches(&post("rust", true, true)));
    }

    #[test]
    fn test_scopes_compose_by_and() {
        let filter = PostFilter::new().featured().published().tagged_with("rust");
        assert!(filter.matches(&post("rust", true, true)));
        assert!(!filter.matches(&post("rust", true, false)));
        assert!(!filter.matches(&post("rust", false, true)));
    }

    #[test]
    fn test_unpublished_scope() {
        let filter = PostFilter::new().unpublished();
        assert!(filter.matches(&post("rust", false, false)));
        assert!(!filter.matches(&post("rust", false, true)));
    }

    #[test]
    fn test_authored_by_exact_match() {
        let filter = PostFilter::new().authored_by("Ada");
        assert!(filter.matches(&post("rust", false, false)));
        assert!(!PostFilter::new().authored_by("ada").matches(&post("rust", false, false)));
    }
}
