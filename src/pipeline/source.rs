//! Source discovery and decoding.
//!
//! The SUS catalogs are single-byte latin1 files. They are decoded with the
//! configured encoding before any pattern matching; reading them as UTF-8
//! corrupts every accented character.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use serde::Serialize;

use super::TableError;
use crate::config::TableConfig;

/// The catalogs one build reads, in processing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSet {
    pub categories: PathBuf,
    /// Sorted by file name.
    pub subcategories: Vec<PathBuf>,
}

impl SourceSet {
    /// Number of files, categories included.
    pub fn file_count(&self) -> usize {
        1 + self.subcategories.len()
    }
}

/// Look up an encoding by its WHATWG label (`latin1`, `iso-8859-1`, `utf-8`, ...).
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, TableError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| TableError::UnknownEncoding(label.to_string()))
}

/// Decode raw catalog bytes. Fails instead of substituting U+FFFD so a
/// mis-declared encoding never leaks replacement characters into the table.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

/// Read and decode one catalog file.
pub fn read_source(path: &Path, encoding: &'static Encoding) -> Result<String, TableError> {
    let bytes = std::fs::read(path).map_err(|e| TableError::UnreadableSource {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    decode_bytes(&bytes, encoding).ok_or_else(|| TableError::Decode {
        path: path.to_path_buf(),
        encoding: encoding.name().to_string(),
    })
}

/// Locate the categories file and every subcategory file in the input directory.
///
/// A missing categories file is the one fatal condition of a build.
pub fn discover_sources(config: &TableConfig) -> Result<SourceSet, TableError> {
    let categories = config.categories_path();
    if !categories.is_file() {
        return Err(TableError::MissingRequiredSource(categories));
    }

    let mut subcategories: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(&config.input_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::debug!(path = %entry.path().display(), "Skipping non UTF-8 file name");
            continue;
        };
        if config.is_subcategory_file(name) && entry.path().is_file() {
            subcategories.push(entry.path());
        }
    }
    // read_dir order is platform-dependent; the table must not be.
    subcategories.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!(
        dir = %config.input_dir.display(),
        subcategories = subcategories.len(),
        "Sources discovered"
    );

    Ok(SourceSet {
        categories,
        subcategories,
    })
}

/// File name for logs and reports.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
