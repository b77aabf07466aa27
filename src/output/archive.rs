use crate::SweepError;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Packages the export tree as a sibling `<output_root>.zip`
///
/// Entry names are relative to the export root and `/`-separated. Files are
/// added in sorted order so the archive listing is stable.
pub fn zip_dir(output_root: &Path) -> Result<PathBuf, SweepError> {
    let root = fs::canonicalize(output_root)?;
    let mut zip_name = root.as_os_str().to_owned();
    zip_name.push(".zip");
    let zip_path = PathBuf::from(zip_name);

    let mut files = Vec::new();
    collect_files(&root, &mut files)?;
    files.sort();

    let mut zip = ZipWriter::new(File::create(&zip_path)?);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in &files {
        let Ok(relative) = file.strip_prefix(&root) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        zip.start_file(name, options)?;
        io::copy(&mut File::open(file)?, &mut zip)?;
    }
    zip.finish()?;

    tracing::info!("ZIP created: {} ({} files)", zip_path.display(), files.len());
    Ok(zip_path)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}
