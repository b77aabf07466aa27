//! Address mapper: URL to export file path
//!
//! The mapping is a pure function of the URL. Path segments before the last
//! become nested directories; the last segment (plus `__<fragment>`) becomes
//! the file stem. A single-segment path lands under `root/` so it cannot
//! collide with the index files at the top of the export.

use crate::url::split_fragment;
use crate::{SweepError, UrlError};
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Directory used for URLs whose path has a single segment
pub const ROOT_DIR: &str = "root";

const FALLBACK_STEM: &str = "index";

/// Where a page is written inside the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputAddress {
    /// Full path of the Markdown file
    pub path: PathBuf,

    /// Path relative to the export root, `/`-separated
    pub relative_path: String,

    /// File stem, stable across runs; used as the document key
    pub key: String,
}

/// Sanitizes a path segment or fragment into a filesystem-safe slug
///
/// Lowercases, maps spaces and any character outside `[A-Za-z0-9-_.]` to
/// `-`, collapses runs of `-`, trims leading and trailing `-._`, and falls
/// back to `index` when nothing is left.
///
/// # Examples
///
/// ```
/// use docsweep::output::slugify;
///
/// assert_eq!(slugify("Getting Started!"), "getting-started");
/// assert_eq!(slugify("..."), "index");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        let mapped = if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
            c
        } else {
            '-'
        };
        if mapped == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(mapped);
    }

    let trimmed = slug.trim_matches(|c| matches!(c, '-' | '.' | '_'));
    if trimmed.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Computes the export address of a URL without touching the filesystem
pub fn address_for(raw_url: &str, output_root: &Path) -> Result<OutputAddress, UrlError> {
    let split = split_fragment(raw_url)?;

    // Decoded so `%20` slugifies like a literal space
    let mut segments: Vec<String> = split
        .page
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        segments.push(FALLBACK_STEM.to_string());
    }

    let Some((last, parents)) = segments.split_last() else {
        return Err(UrlError::Parse(raw_url.to_string()));
    };

    let mut key = slugify(last);
    if let Some(fragment) = &split.fragment {
        key.push_str("__");
        key.push_str(&slugify(fragment));
    }

    let dirs: Vec<String> = if parents.is_empty() {
        vec![ROOT_DIR.to_string()]
    } else {
        parents.iter().map(|s| slugify(s)).collect()
    };

    let file_name = format!("{}.md", key);
    let mut path = output_root.to_path_buf();
    for dir in &dirs {
        path.push(dir);
    }
    path.push(&file_name);

    let mut relative_path = dirs.join("/");
    relative_path.push('/');
    relative_path.push_str(&file_name);

    Ok(OutputAddress {
        path,
        relative_path,
        key,
    })
}

/// Computes the export address of a URL and creates its parent directories
///
/// Directory creation is idempotent.
pub fn map_url(raw_url: &str, output_root: &Path) -> Result<OutputAddress, SweepError> {
    let address = address_for(raw_url, output_root)?;
    if let Some(parent) = address.path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(address)
}
