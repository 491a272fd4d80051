//! Ordered, code-unique aggregation of entries across catalog files.
//!
//! Insertion order is first-seen order. A code that was already inserted
//! (typically a categories-file code repeated in a subcategories file) is
//! dropped: the first occurrence wins.

use std::collections::HashSet;

use serde::Serialize;

use super::chapter::classify;
use super::normalize::normalize_description;
use super::parse::{parse_source, ParsedLine};
use crate::models::CodeEntry;

/// Counters for one ingested catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub source: String,
    /// Lines after the header.
    pub data_lines: usize,
    pub parsed: usize,
    pub added: usize,
    pub duplicates: usize,
}

/// Build the display entry for a parsed line.
///
/// The description is never empty: if normalization leaves nothing the
/// trimmed raw text is kept, and as a last resort the code itself.
pub fn entry_from_line(line: &ParsedLine) -> CodeEntry {
    let mut description = normalize_description(&line.raw_description);
    if description.is_empty() {
        description = line.raw_description.trim().to_string();
    }
    if description.is_empty() {
        description = line.code.clone();
    }

    CodeEntry {
        code: line.code.clone(),
        description,
        category: classify(&line.code).label().to_string(),
    }
}

#[derive(Debug, Default)]
pub struct CodeTable {
    entries: Vec<CodeEntry>,
    seen: HashSet<String>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless the code is already present. Returns whether it was added.
    pub fn insert(&mut self, entry: CodeEntry) -> bool {
        if self.seen.contains(&entry.code) {
            return false;
        }
        self.seen.insert(entry.code.clone());
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, code: &str) -> bool {
        self.seen.contains(code)
    }

    /// Parse, normalize, classify and insert every data line of a decoded catalog.
    pub fn ingest(&mut self, source: &str, text: &str) -> SourceReport {
        let mut report = SourceReport {
            source: source.to_string(),
            data_lines: text.lines().skip(1).count(),
            ..SourceReport::default()
        };

        for line in parse_source(text) {
            report.parsed += 1;
            if self.insert(entry_from_line(&line)) {
                report.added += 1;
            } else {
                report.duplicates += 1;
            }
        }

        tracing::debug!(
            source = %report.source,
            parsed = report.parsed,
            added = report.added,
            duplicates = report.duplicates,
            "Catalog ingested"
        );

        report
    }

    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CodeEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
