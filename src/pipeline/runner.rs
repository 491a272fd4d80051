//! Table build orchestration.
//!
//! Runs strictly sequentially: discover → categories file → each subcategory
//! file in name order → emit. Only a missing or unreadable categories file
//! aborts the run; a bad subcategory file is logged and skipped.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use super::aggregate::{CodeTable, SourceReport};
use super::emit::write_table;
use super::source::{discover_sources, display_name, read_source, resolve_encoding};
use super::TableError;
use crate::config::TableConfig;
use crate::models::CodeEntry;

/// A subcategory file that contributed nothing because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSource {
    pub source: String,
    pub reason: String,
}

/// Summary of one build, serializable for `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub encoding: String,
    pub categories: SourceReport,
    pub subcategories: Vec<SourceReport>,
    pub skipped: Vec<SkippedSource>,
    pub total_entries: usize,
    pub duplicates_dropped: usize,
    pub duration_ms: u64,
}

/// Read every source into a deduplicated table without writing anything.
pub fn collect_entries(config: &TableConfig) -> Result<(Vec<CodeEntry>, RunReport), TableError> {
    let start = Instant::now();
    config.validate()?;
    let encoding = resolve_encoding(&config.encoding)?;
    let sources = discover_sources(config)?;

    tracing::info!(
        dir = %config.input_dir.display(),
        files = sources.file_count(),
        encoding = encoding.name(),
        "Building CID-10 table"
    );

    let mut table = CodeTable::new();

    let categories_text = read_source(&sources.categories, encoding)?;
    let categories = table.ingest(&display_name(&sources.categories), &categories_text);
    tracing::info!(
        file = %categories.source,
        added = categories.added,
        "Categories processed"
    );

    let mut subcategories = Vec::with_capacity(sources.subcategories.len());
    let mut skipped = Vec::new();
    for path in &sources.subcategories {
        let name = display_name(path);
        match read_source(path, encoding) {
            Ok(text) => {
                let report = table.ingest(&name, &text);
                tracing::info!(
                    file = %name,
                    added = report.added,
                    duplicates = report.duplicates,
                    "Subcategories processed"
                );
                subcategories.push(report);
            }
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "Skipping unreadable subcategory file");
                skipped.push(SkippedSource {
                    source: name,
                    reason: e.to_string(),
                });
            }
        }
    }

    let duplicates_dropped = categories.duplicates
        + subcategories.iter().map(|r| r.duplicates).sum::<usize>();
    let entries = table.into_entries();

    let report = RunReport {
        input_dir: config.input_dir.clone(),
        output_path: config.output_path.clone(),
        encoding: encoding.name().to_string(),
        categories,
        subcategories,
        skipped,
        total_entries: entries.len(),
        duplicates_dropped,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    Ok((entries, report))
}

/// Full build: collect, write the table module and, when configured, the
/// JSON run report.
pub fn build_table(config: &TableConfig) -> Result<(Vec<CodeEntry>, RunReport), TableError> {
    let (entries, report) = collect_entries(config)?;
    write_table(&config.output_path, &config.const_name, &entries)?;

    if let Some(report_path) = &config.report_path {
        write_report(report_path, &report)?;
    }

    tracing::info!(
        entries = report.total_entries,
        duplicates = report.duplicates_dropped,
        skipped = report.skipped.len(),
        output = %config.output_path.display(),
        "CID-10 table built"
    );

    Ok((entries, report))
}

fn write_report(path: &Path, report: &RunReport) -> Result<(), TableError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let json = serde_json::to_string_pretty(report)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(json.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    tracing::debug!(path = %path.display(), "Run report written");
    Ok(())
}

/// First `limit` entries as `CODE - description (category)` lines.
pub fn preview_lines(entries: &[CodeEntry], limit: usize) -> Vec<String> {
    entries
        .iter()
        .take(limit)
        .map(|e| format!("{} ({})", e.label(), e.category))
        .collect()
}
