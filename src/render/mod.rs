//! HTML to Markdown rendering
//!
//! The crawl core only sees the narrow [`Renderer`] trait: one Markdown
//! string or a typed failure. When rendering fails the coordinator falls back
//! to [`plain_text`], so a fetched page is never left unrendered.

mod markdown;
mod slice;

pub use markdown::MarkdownRenderer;
pub use slice::{heading_rank, slice_section};

use scraper::{Html, Node};
use thiserror::Error;
use url::Url;

/// Errors reported by a renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer produced no content")]
    Empty,

    #[error("renderer failed: {0}")]
    Failed(String),
}

/// Converts an HTML document or fragment into Markdown
pub trait Renderer: Send + Sync {
    /// Short name used in logs and startup errors
    fn name(&self) -> &str;

    /// Verifies the renderer is usable before any page is fetched
    fn probe(&self) -> Result<(), RenderError>;

    /// Renders `html` (fetched from `url`) to Markdown
    fn render(&self, url: &Url, html: &str) -> Result<String, RenderError>;
}

/// Elements whose text is never content
const NON_CONTENT: &[&str] = &["script", "style", "noscript", "template"];

/// Last-resort rendering: the visible text of the HTML, one run per line
pub fn plain_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| NON_CONTENT.contains(&e.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}
