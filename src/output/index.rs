//! Export index builder
//!
//! Writes the two index documents once, after traversal ends, listing pages in
//! the order they were persisted.

use crate::output::writer::{write_atomic, PersistError};
use crate::output::PageRecord;
use std::path::{Path, PathBuf};

/// Flat bullet index file name
pub const FLAT_INDEX_FILE: &str = "llms.txt";

/// Markdown table index file name
pub const TABLE_INDEX_FILE: &str = "llms_index.md";

/// Paths of the written index documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFiles {
    pub flat: PathBuf,
    pub table: PathBuf,
}

/// Writes `llms.txt` and `llms_index.md` at the export root
pub fn build_indexes(output_root: &Path, records: &[PageRecord]) -> Result<IndexFiles, PersistError> {
    let flat = output_root.join(FLAT_INDEX_FILE);
    let table = output_root.join(TABLE_INDEX_FILE);

    write_atomic(&flat, &format_flat_index(records))?;
    write_atomic(&table, &format_table_index(records))?;

    tracing::info!(
        "Wrote {} and {} ({} pages)",
        flat.display(),
        table.display(),
        records.len()
    );

    Ok(IndexFiles { flat, table })
}

/// One bullet per page: `- [title](path) — description`
pub fn format_flat_index(records: &[PageRecord]) -> String {
    let mut out = String::from("# Exported docs index\n\n");
    for record in records {
        out.push_str(&format!("- [{}]({})", record.title, record.relative_path));
        if !record.description.is_empty() {
            out.push_str(&format!(" — {}", record.description));
        }
        out.push('\n');
    }
    out
}

/// One table row per page: title, file, source URL
pub fn format_table_index(records: &[PageRecord]) -> String {
    let mut out = String::from("# LLMS Export Index\n\n");
    out.push_str("| Title | File | Source URL |\n");
    out.push_str("|---|---|---|\n");
    for record in records {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&record.title),
            escape_cell(&record.relative_path),
            escape_cell(&record.url)
        ));
    }
    out
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
