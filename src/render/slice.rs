//! Fragment slicer
//!
//! Extracts the section of a page that an `#anchor` points at: the nearest
//! heading at or above the anchor plus its following siblings, up to the next
//! heading of the same or higher rank.

use scraper::{ElementRef, Html, Node};

/// Rank used when the anchor has no enclosing heading; any heading ends the section
const IMPLICIT_RANK: u8 = 6;

/// Returns the heading rank (1-6) for an element name, or `None`
pub fn heading_rank(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Slices the section identified by `fragment_id` out of a page
///
/// The anchor is the first element whose `id` equals `fragment_id`, or failing
/// that, whose `name` does. Returns `None` when no such element exists; the
/// caller renders the full page instead.
///
/// The result is the collected nodes wrapped in a `<div>`, meant to be handed
/// to a renderer.
///
/// # Examples
///
/// ```
/// use docsweep::render::slice_section;
///
/// let html = r#"<h2 id="a">A</h2><p>one</p><h2 id="b">B</h2><p>two</p>"#;
/// let section = slice_section(html, "a").unwrap();
/// assert!(section.contains("one"));
/// assert!(!section.contains("two"));
/// ```
pub fn slice_section(html: &str, fragment_id: &str) -> Option<String> {
    if fragment_id.is_empty() {
        return None;
    }

    let document = Html::parse_document(html);
    let anchor = find_anchor(&document, fragment_id)?;
    let start = enclosing_heading(anchor).unwrap_or(anchor);
    let rank = heading_rank(start.value().name()).unwrap_or(IMPLICIT_RANK);

    let mut section = String::from("<div>");
    section.push_str(&start.html());

    for sibling in start.next_siblings() {
        match sibling.value() {
            Node::Element(element) => {
                if heading_rank(element.name()).is_some_and(|r| r <= rank) {
                    break;
                }
                if let Some(element) = ElementRef::wrap(sibling) {
                    section.push_str(&element.html());
                }
            }
            Node::Text(text) => section.push_str(&escape_text(text)),
            _ => {}
        }
    }

    section.push_str("</div>");
    Some(section)
}

fn find_anchor<'a>(document: &'a Html, fragment_id: &str) -> Option<ElementRef<'a>> {
    let elements = || document.root_element().descendants().filter_map(ElementRef::wrap);

    elements()
        .find(|e| e.value().id() == Some(fragment_id))
        .or_else(|| elements().find(|e| e.value().attr("name") == Some(fragment_id)))
}

/// The element itself if it is a heading, else its closest heading ancestor
fn enclosing_heading(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|e| heading_rank(e.value().name()).is_some())
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
