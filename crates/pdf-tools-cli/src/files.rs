//! Input collection and output naming

use anyhow::{Context, Result};
use pdf_image_grid::{ImageKind, LayoutStyle};
use std::path::{Path, PathBuf};

/// Supported images directly inside `dir`, sorted by path.
///
/// Subdirectories are not searched.
pub fn scan_folder(dir: &Path, layout: LayoutStyle) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        let accepted = path.is_file()
            && ImageKind::from_path(&path).is_some_and(|kind| layout.accepts(kind));
        if accepted {
            found.push(path);
        }
    }

    found.sort();
    Ok(found)
}

/// `dir/stem.pdf`, or the first free `dir/stem_NNN.pdf`
pub fn unique_output_path(dir: &Path, stem: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{stem}.pdf"));
    let mut counter = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{stem}_{counter:03}.pdf"));
        counter += 1;
    }
    candidate
}
