use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Key/value assigns interpolated into the markdown before rendering.
pub type RenderContext = HashMap<String, String>;

/// One heading in a rendered table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub anchor: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

/// Markdown rendering. Pure text transformation, no caching - every call
/// recomputes.
pub trait MarkdownRenderer: Send + Sync {
    /// Render markdown to HTML, substituting `{{key}}` placeholders from the
    /// context first.
    fn to_html(&self, markdown: &str, context: &RenderContext) -> String;

    /// Extract a table of contents from headings of level <= `max_depth`.
    fn toc(&self, markdown: &str, max_depth: u8) -> Vec<TocEntry>;
}
