//! Output module for the Markdown export tree
//!
//! This module handles:
//! - Mapping URLs to stable file paths inside the export
//! - Writing page documents atomically
//! - Building the `llms.txt` and `llms_index.md` index documents
//! - Packaging the export as a ZIP archive
//! - Run statistics

mod address;
mod archive;
mod index;
pub mod stats;
mod writer;

pub use address::{address_for, map_url, slugify, OutputAddress, ROOT_DIR};
pub use archive::zip_dir;
pub use index::{
    build_indexes, format_flat_index, format_table_index, IndexFiles, FLAT_INDEX_FILE,
    TABLE_INDEX_FILE,
};
pub use stats::{print_statistics, CrawlStats};
pub use writer::{ensure_output_dir, write_atomic, PersistError};

use std::path::PathBuf;

/// Metadata captured for every exported page
///
/// Created once when the page document is persisted and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Source URL as dequeued, including its fragment if any
    pub url: String,

    /// Full path of the written Markdown file
    pub file_path: PathBuf,

    /// Path relative to the export root, `/`-separated
    pub relative_path: String,

    /// Page `<title>`, or `Untitled`
    pub title: String,

    /// First paragraph, whitespace-collapsed and capped
    pub description: String,
}
