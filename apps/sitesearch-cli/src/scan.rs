//! Discovery of scanner output in a built site tree.
//!
//! The page scanner itself is an external tool; it leaves one
//! `documents.json` per site version next to the rendered pages. Each file
//! holds the three parallel document lists for that version.

use std::path::{Path, PathBuf};

use sitesearch_core::error::{Error, Result};
use sitesearch_core::traits::DocumentScanner;
use sitesearch_core::types::{DocumentLists, VersionDocuments};
use walkdir::WalkDir;

pub const SCAN_FILE_NAME: &str = "documents.json";

/// Reads scanner output files from disk.
#[derive(Debug, Default)]
pub struct JsonDocumentScanner;

impl DocumentScanner for JsonDocumentScanner {
    fn scan(&self, paths: &[PathBuf]) -> Result<DocumentLists> {
        let mut merged = DocumentLists::default();
        for path in paths {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| Error::Build(format!("read {}: {e}", path.display())))?;
            let lists: DocumentLists = serde_json::from_str(&raw)
                .map_err(|e| Error::Build(format!("parse {}: {e}", path.display())))?;
            merged.titles.extend(lists.titles);
            merged.headings.extend(lists.headings);
            merged.contents.extend(lists.contents);
        }
        Ok(merged)
    }
}

/// Walk a built site tree and return one `VersionDocuments` per directory
/// containing a scan file. Directory order is sorted for determinism.
pub fn discover_versions(root: &Path) -> Result<Vec<VersionDocuments>> {
    let scanner = JsonDocumentScanner;
    let mut scan_files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name().to_str() == Some(SCAN_FILE_NAME))
        .map(|e| e.path().to_path_buf())
        .collect();
    scan_files.sort();

    let mut versions = Vec::with_capacity(scan_files.len());
    for file in scan_files {
        let out_dir = file
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::Build(format!("{} has no parent directory", file.display())))?;
        let lists = scanner.scan(std::slice::from_ref(&file))?;
        versions.push(VersionDocuments { out_dir, lists });
    }
    Ok(versions)
}
