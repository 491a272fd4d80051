//! Read-only view over an emitted CID-10 table: the search widget's contract
//! (substring search with a display cap) and code lookup.
//!
//! The table is loaded once and never mutated; share it by reference.

use std::collections::HashMap;
use std::path::Path;

use crate::models::CodeEntry;
use crate::pipeline::{load_table, TableError};

/// Queries shorter than this (after trimming) return nothing.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone)]
pub struct CodeCatalog {
    entries: Vec<CodeEntry>,
    by_code: HashMap<String, usize>,
}

impl CodeCatalog {
    /// Index a table. Codes are expected unique; should one repeat, lookups
    /// resolve to its first row.
    pub fn new(entries: Vec<CodeEntry>) -> Self {
        let mut by_code = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            by_code.entry(entry.code.clone()).or_insert(i);
        }
        Self { entries, by_code }
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let table = load_table(path)?;
        tracing::debug!(
            path = %path.display(),
            constant = %table.const_name,
            entries = table.entries.len(),
            "Catalog loaded"
        );
        Ok(Self::new(table.entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    pub fn get(&self, code: &str) -> Option<&CodeEntry> {
        self.by_code.get(code.trim()).map(|&i| &self.entries[i])
    }

    /// `"CODE - description"`, or the bare code when it is not in the table.
    pub fn describe(&self, code: &str) -> String {
        match self.get(code) {
            Some(entry) => entry.label(),
            None => code.to_string(),
        }
    }

    /// Case-insensitive substring search over code, description and
    /// category, in table order, at most `limit` results.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&CodeEntry> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|e| e.matches(&needle))
            .take(limit)
            .collect()
    }
}
