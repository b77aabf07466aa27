//! HTML parser for extracting links and metadata
//!
//! This module handles parsing fetched HTML to extract:
//! - Links to follow (from `<a href>` tags)
//! - Page title and a short description for the export indexes

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Title used when a page has no usable `<title>`
pub const UNTITLED: &str = "Untitled";

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 280;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title, or [`UNTITLED`]
    pub title: String,

    /// Text of the first paragraph, whitespace-collapsed and capped
    pub description: String,

    /// Outbound links in document order, resolved to absolute http(s) URLs
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts links and metadata
///
/// # Link Extraction Rules
///
/// **Include:** every `<a href="...">`, resolved against `base_url` (the
/// final URL after redirects).
///
/// **Exclude:**
/// - `javascript:` and `mailto:` links
/// - Hrefs that fail to resolve
/// - Anything whose resolved scheme is not http or https
///
/// # Example
///
/// ```
/// use docsweep::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><p>Intro.</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.description, "Intro.");
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        description: extract_description(&document),
        links: extract_links(&document, base_url),
    }
}

fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return UNTITLED.to_string();
    };

    document
        .select(&selector)
        .next()
        .map(|element| collapse_whitespace(&element_text(element)))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn extract_description(document: &Html) -> String {
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| {
            collapse_whitespace(&element_text(element))
                .chars()
                .take(MAX_DESCRIPTION_CHARS)
                .collect()
        })
        .unwrap_or_default()
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to an absolute URL and validates it
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.starts_with("javascript:") || href.starts_with("mailto:") {
        return None;
    }

    let resolved = base_url.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}

/// Text nodes joined with spaces so adjacent inline elements stay separated
fn element_text(element: ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
