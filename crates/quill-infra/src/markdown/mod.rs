//! Markdown rendering via pulldown-cmark.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

use quill_core::ports::{MarkdownRenderer, RenderContext, TocEntry};

/// CommonMark renderer with `{{key}}` context interpolation and a
/// heading-scan table of contents.
pub struct CmarkRenderer;

impl CmarkRenderer {
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES
    }
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn to_html(&self, markdown: &str, context: &RenderContext) -> String {
        let source = interpolate(markdown, context);
        let parser = Parser::new_ext(&source, Self::options());
        let mut out = String::with_capacity(source.len() * 2);
        html::push_html(&mut out, parser);
        out
    }

    fn toc(&self, markdown: &str, max_depth: u8) -> Vec<TocEntry> {
        let parser = Parser::new_ext(markdown, Self::options());

        let mut flat: Vec<(u8, String)> = Vec::new();
        let mut current: Option<(u8, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current = Some((level as u8, String::new()));
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some((_, buf)) = current.as_mut() {
                        buf.push_str(&text);
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, title)) = current.take() {
                        if level <= max_depth {
                            flat.push((level, title));
                        }
                    }
                }
                _ => {}
            }
        }

        nest(flat)
    }
}

/// Replace `{{key}}` (and the spaced `{{ key }}` form) with context values.
fn interpolate(markdown: &str, context: &RenderContext) -> String {
    let mut out = markdown.to_string();
    for (key, value) in context {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
        out = out.replace(&format!("{{{{ {key} }}}}"), value);
    }
    out
}

/// Fold a flat heading list into a tree: a heading becomes a child of the
/// closest preceding shallower heading.
fn nest(flat: Vec<(u8, String)>) -> Vec<TocEntry> {
    let mut root = Vec::new();
    for (level, title) in flat {
        let anchor = slug::slugify(&title);
        push_nested(
            &mut root,
            TocEntry {
                level,
                title,
                anchor,
                children: Vec::new(),
            },
        );
    }
    root
}

fn push_nested(siblings: &mut Vec<TocEntry>, entry: TocEntry) {
    match siblings.last_mut() {
        Some(last) if entry.level > last.level => push_nested(&mut last.children, entry),
        _ => siblings.push(entry),
    }
}
