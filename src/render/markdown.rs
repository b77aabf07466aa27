use crate::render::{RenderError, Renderer, NON_CONTENT};
use scraper::{Html, Selector};
use std::panic::{self, AssertUnwindSafe};
use url::Url;

const PROBE_HTML: &str = "<h1>docsweep probe</h1><p>ok</p>";

/// Renderer backed by the `html2md` crate
///
/// Scripts, styles and similar non-content elements are removed before
/// conversion.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for MarkdownRenderer {
    fn name(&self) -> &str {
        "html2md"
    }

    fn probe(&self) -> Result<(), RenderError> {
        let probe_url = Url::parse("https://docsweep.invalid/probe")
            .map_err(|e| RenderError::Failed(e.to_string()))?;
        let markdown = self.render(&probe_url, PROBE_HTML)?;
        if markdown.contains("docsweep probe") {
            Ok(())
        } else {
            Err(RenderError::Failed(format!(
                "unexpected probe output: {:?}",
                markdown
            )))
        }
    }

    fn render(&self, url: &Url, html: &str) -> Result<String, RenderError> {
        let cleaned = strip_non_content(html);

        // html2md has no error channel; a panic is its failure signal
        let markdown = panic::catch_unwind(AssertUnwindSafe(|| html2md::parse_html(&cleaned)))
            .map_err(|_| RenderError::Failed(format!("html2md panicked on {}", url)))?;

        let markdown = markdown.trim();
        if markdown.is_empty() {
            return Err(RenderError::Empty);
        }
        Ok(markdown.to_string())
    }
}

/// Removes script/style/noscript/template elements and returns the serialized HTML
fn strip_non_content(html: &str) -> String {
    let mut document = Html::parse_document(html);

    let Ok(selector) = Selector::parse(&NON_CONTENT.join(", ")) else {
        return html.to_string();
    };
    let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document.root_element().html()
}
