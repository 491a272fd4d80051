//! Description normalization: expands SUS catalog shorthand into readable
//! Portuguese.
//!
//! The abbreviation table is an ordered rewriting system. Rules run in
//! declared order, each over the output of the previous one, so the table
//! must stay a slice and never become a map.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// `(abbreviation, expansion)` in application order. Matching is
/// case-insensitive and token-based: an abbreviation only matches where it
/// is not glued to other letters, so expanded words never re-trigger.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("NCOP", "não classificado em outra parte"),
    ("NE", "não especificado"),
    ("c/", "com "),
    ("s/", "sem "),
    ("p/", "por "),
    ("outr", "outras"),
    ("doenc", "doenças"),
    ("infecc", "infecções"),
    ("bacter", "bacterianas"),
    ("orig", "origem"),
    ("presum", "presumível"),
    ("tuberc", "tuberculose"),
    ("respirat", "respiratória"),
    ("conf", "confirmação"),
    ("bacteriol", "bacteriológica"),
    ("histolog", "histológica"),
    ("sist", "sistema"),
    ("orgaos", "órgãos"),
    ("intox", "intoxicação"),
    ("sindr", "síndrome"),
    ("depend", "dependência"),
    ("transt", "transtornos"),
    ("neopl", "neoplasia"),
    ("malig", "maligna"),
    ("complic", "complicações"),
];

struct Rule {
    pattern: Regex,
    expansion: &'static str,
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|&(abbreviation, expansion)| Rule {
            pattern: Regex::new(&token_pattern(abbreviation))
                .expect("abbreviation patterns are valid"),
            expansion,
        })
        .collect()
});

/// Word boundaries only on edges that are word characters: `NE` becomes
/// `(?i)\bNE\b`, `c/` becomes `(?i)\bc/`.
fn token_pattern(abbreviation: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let mut pattern = String::from("(?i)");
    if is_word(abbreviation.chars().next()) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(abbreviation));
    if is_word(abbreviation.chars().last()) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// Apply every abbreviation rule in order. No whitespace or case cleanup.
pub fn expand_abbreviations(raw: &str) -> String {
    RULES.iter().fold(raw.to_string(), |text, rule| {
        rule.pattern
            .replace_all(&text, NoExpand(rule.expansion))
            .into_owned()
    })
}

/// Normalize a raw catalog description into its display form.
///
/// Pure: expands abbreviations, collapses whitespace, trims and uppercases
/// the first character only.
pub fn normalize_description(raw: &str) -> String {
    let expanded = expand_abbreviations(raw);
    let collapsed = expanded.split_whitespace().collect::<Vec<_>>().join(" ");
    capitalize_first(&collapsed)
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut s: String = first.to_uppercase().collect();
            s.push_str(chars.as_str());
            s
        }
        None => String::new(),
    }
}
