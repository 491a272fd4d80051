use serde::{Deserialize, Serialize};

/// One row of the CID-10 lookup table, in display-ready form.
///
/// Field order is the serialized order: `code`, `description`, `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    pub description: String,
    pub category: String,
}

impl CodeEntry {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            category: category.into(),
        }
    }

    /// `"F10.0 - Intoxicação aguda"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.description)
    }

    /// Case-insensitive substring match against code, description and category.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.code.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_fields_in_table_order() {
        let entry = CodeEntry::new("A00", "Colera", "Infecciosas e Parasitárias");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"code":"A00","description":"Colera","category":"Infecciosas e Parasitárias"}"#
        );
    }

    #[test]
    fn deserializes_emitted_row() {
        let json = r#"{"code":"F10.0","description":"Intoxicação aguda","category":"Transtornos Mentais"}"#;
        let entry: CodeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.code, "F10.0");
        assert_eq!(entry.description, "Intoxicação aguda");
    }

    #[test]
    fn label_joins_code_and_description() {
        let entry = CodeEntry::new("F10.0", "Intoxicação aguda", "Transtornos Mentais");
        assert_eq!(entry.label(), "F10.0 - Intoxicação aguda");
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let entry = CodeEntry::new("J45", "Asma", "Aparelho Respiratório");
        assert!(entry.matches("j45"));
        assert!(entry.matches("asma"));
        assert!(entry.matches("respirat"));
        assert!(!entry.matches("neoplasia"));
    }
}
