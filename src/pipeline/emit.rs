//! Table emitter: serializes the final entries as a directly importable
//! TypeScript module, and reads such a module back.
//!
//! Output shape:
//! ```text
//! export const CID10_DATABASE = [
//!   {
//!     "code": "A00",
//!     "description": "Colera",
//!     "category": "Infecciosas e Parasitárias"
//!   }
//! ];
//! ```

use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::TableError;
use crate::models::CodeEntry;

static TABLE_MODULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)export\s+const\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*(?::[^=]*)?=\s*(\[.*\])\s*;?\s*$")
        .expect("table module pattern is valid")
});

/// A table module read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTable {
    pub const_name: String,
    pub entries: Vec<CodeEntry>,
}

/// Render the module text. Same entries in, same bytes out.
pub fn render_table(const_name: &str, entries: &[CodeEntry]) -> Result<String, TableError> {
    let json = serde_json::to_string_pretty(entries)?;
    Ok(format!("export const {const_name} = {json};\n"))
}

/// Write the module, creating parent directories. The file is written to a
/// temporary sibling and renamed into place so a failed run never leaves a
/// truncated table behind.
pub fn write_table(path: &Path, const_name: &str, entries: &[CodeEntry]) -> Result<(), TableError> {
    let content = render_table(const_name, entries)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::info!(
        path = %path.display(),
        entries = entries.len(),
        bytes = content.len(),
        "Table written"
    );
    Ok(())
}

/// Extract the exported array from module text.
pub fn parse_table(text: &str) -> Result<NamedTable, TableError> {
    let caps = TABLE_MODULE
        .captures(text)
        .ok_or_else(|| TableError::MalformedTable("no exported array constant found".into()))?;

    let entries: Vec<CodeEntry> = serde_json::from_str(&caps[2])?;
    Ok(NamedTable {
        const_name: caps[1].to_string(),
        entries,
    })
}

/// Read a previously emitted module from disk.
pub fn load_table(path: &Path) -> Result<NamedTable, TableError> {
    let text = std::fs::read_to_string(path)?;
    parse_table(&text)
}
