use std::path::PathBuf;

use serde::Serialize;

use crate::pipeline::TableError;

/// Application-level constants
pub const APP_NAME: &str = "process-cid10";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory holding the SUS catalog files, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "attached_assets";
/// The single top-level categories catalog. A hard dependency of every run.
pub const DEFAULT_CATEGORIES_FILE: &str = "CID10-categorias.cnv";
/// Per-chapter subcategory catalogs: `CID10-subcategorias-A.cnv`, ...
pub const DEFAULT_SUBCATEGORY_PREFIX: &str = "CID10-subcategorias";
pub const DEFAULT_SUBCATEGORY_EXTENSION: &str = ".cnv";
/// The catalogs are published in latin1, never UTF-8.
pub const DEFAULT_ENCODING: &str = "latin1";
pub const DEFAULT_OUTPUT_PATH: &str = "client/src/data/cid10-database.ts";
pub const DEFAULT_CONST_NAME: &str = "CID10_DATABASE";
/// Display cap of the search widget.
pub const DEFAULT_SEARCH_LIMIT: usize = 15;

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info"
}

/// Everything a table build needs to know about its inputs and output.
///
/// Resolution order: `Default` values, then `CID10_*` environment variables
/// (`from_env`), then command-line flags applied by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct TableConfig {
    pub input_dir: PathBuf,
    pub categories_file: String,
    pub subcategory_prefix: String,
    pub subcategory_extension: String,
    /// WHATWG encoding label used to decode the catalogs.
    pub encoding: String,
    pub output_path: PathBuf,
    pub const_name: String,
    pub search_limit: usize,
    /// Optional JSON run report destination.
    pub report_path: Option<PathBuf>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            categories_file: DEFAULT_CATEGORIES_FILE.into(),
            subcategory_prefix: DEFAULT_SUBCATEGORY_PREFIX.into(),
            subcategory_extension: DEFAULT_SUBCATEGORY_EXTENSION.into(),
            encoding: DEFAULT_ENCODING.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            const_name: DEFAULT_CONST_NAME.into(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            report_path: None,
        }
    }
}

impl TableConfig {
    /// Defaults with `CID10_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup (the process environment
    /// in production, a map in tests). Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get("CID10_INPUT_DIR") {
            self.input_dir = PathBuf::from(dir);
        }
        if let Some(name) = get("CID10_CATEGORIES_FILE") {
            self.categories_file = name;
        }
        if let Some(prefix) = get("CID10_SUBCATEGORY_PREFIX") {
            self.subcategory_prefix = prefix;
        }
        if let Some(ext) = get("CID10_SUBCATEGORY_EXTENSION") {
            self.subcategory_extension = ext;
        }
        if let Some(encoding) = get("CID10_ENCODING") {
            self.encoding = encoding;
        }
        if let Some(output) = get("CID10_OUTPUT") {
            self.output_path = PathBuf::from(output);
        }
        if let Some(name) = get("CID10_CONST_NAME") {
            self.const_name = name;
        }
        if let Some(limit) = get("CID10_SEARCH_LIMIT") {
            match limit.trim().parse() {
                Ok(n) => self.search_limit = n,
                Err(_) => tracing::warn!(value = %limit, "Ignoring invalid CID10_SEARCH_LIMIT"),
            }
        }
        self
    }

    pub fn categories_path(&self) -> PathBuf {
        self.input_dir.join(&self.categories_file)
    }

    /// Whether `file_name` names a subcategory catalog under this config.
    /// The categories file itself never qualifies.
    pub fn is_subcategory_file(&self, file_name: &str) -> bool {
        file_name != self.categories_file
            && file_name.starts_with(&self.subcategory_prefix)
            && file_name.ends_with(&self.subcategory_extension)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.categories_file.trim().is_empty() {
            return Err(TableError::InvalidConfig("categories file name is empty".into()));
        }
        if self.subcategory_prefix.is_empty() {
            return Err(TableError::InvalidConfig("subcategory prefix is empty".into()));
        }
        if self.subcategory_extension.is_empty() {
            return Err(TableError::InvalidConfig("subcategory extension is empty".into()));
        }
        if !is_identifier(&self.const_name) {
            return Err(TableError::InvalidConfig(format!(
                "constant name '{}' is not a valid identifier",
                self.const_name
            )));
        }
        if self.search_limit == 0 {
            return Err(TableError::InvalidConfig("search limit must be positive".into()));
        }
        crate::pipeline::source::resolve_encoding(&self.encoding)?;
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> TableConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TableConfig::default().with_overrides(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_match_fixed_layout() {
        let config = TableConfig::default();
        assert_eq!(config.categories_path(), PathBuf::from("attached_assets/CID10-categorias.cnv"));
        assert_eq!(config.output_path, PathBuf::from("client/src/data/cid10-database.ts"));
        assert_eq!(config.const_name, "CID10_DATABASE");
        assert_eq!(config.search_limit, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_replace_defaults() {
        let config = overrides(&[
            ("CID10_INPUT_DIR", "/data/sus"),
            ("CID10_SUBCATEGORY_PREFIX", "SUB-"),
            ("CID10_ENCODING", "windows-1252"),
            ("CID10_SEARCH_LIMIT", "20"),
        ]);
        assert_eq!(config.input_dir, PathBuf::from("/data/sus"));
        assert_eq!(config.subcategory_prefix, "SUB-");
        assert_eq!(config.encoding, "windows-1252");
        assert_eq!(config.search_limit, 20);
    }

    #[test]
    fn blank_and_invalid_overrides_are_ignored() {
        let config = overrides(&[("CID10_OUTPUT", "  "), ("CID10_SEARCH_LIMIT", "many")]);
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.search_limit, DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn subcategory_file_matching() {
        let config = TableConfig::default();
        assert!(config.is_subcategory_file("CID10-subcategorias-A.cnv"));
        assert!(config.is_subcategory_file("CID10-subcategorias-Z.cnv"));
        assert!(!config.is_subcategory_file("CID10-categorias.cnv"));
        assert!(!config.is_subcategory_file("CID10-subcategorias-A.txt"));
        assert!(!config.is_subcategory_file("README.cnv"));
    }

    #[test]
    fn categories_file_never_counts_as_subcategory() {
        let mut config = TableConfig::default();
        config.subcategory_prefix = "CID10-".into();
        assert!(!config.is_subcategory_file("CID10-categorias.cnv"));
        assert!(config.is_subcategory_file("CID10-subcategorias-F.cnv"));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = TableConfig::default();
        config.const_name = "1TABLE".into();
        assert!(matches!(config.validate(), Err(TableError::InvalidConfig(_))));

        let mut config = TableConfig::default();
        config.subcategory_prefix.clear();
        assert!(matches!(config.validate(), Err(TableError::InvalidConfig(_))));

        let mut config = TableConfig::default();
        config.encoding = "klingon-8".into();
        assert!(matches!(config.validate(), Err(TableError::UnknownEncoding(_))));
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("CID10_DATABASE"));
        assert!(is_identifier("_table"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("cid-10"));
    }

    #[test]
    fn config_serializes() {
        let json = serde_json::to_string(&TableConfig::default()).unwrap();
        assert!(json.contains("\"categories_file\":\"CID10-categorias.cnv\""));
        assert!(json.contains("\"report_path\":null"));
    }
}
