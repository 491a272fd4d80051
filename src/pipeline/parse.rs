//! Line parser for the fixed-width SUS catalog format.
//!
//! A data line looks like
//! ```text
//!      39  F10.0 Intox aguda                                  F100,
//! ```
//! sequence number, CID-10 code, description, source code. Anything else
//! (headers, footers, blank lines) is simply not data.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static DATA_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s+([A-Z]\d{2}(?:\.\d)?)\s+(.+?)\s+([A-Za-z0-9]+),?\s*$")
        .expect("data line pattern is valid")
});

/// One matched data line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLine {
    /// Leading sequence column exactly as written; any length of digits.
    pub sequence: String,
    pub code: String,
    pub raw_description: String,
    /// Trailing compact code column (`F100` for `F10.0`).
    pub source_code: String,
}

/// Parse a single line. `None` for anything that is not a data line.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let caps = DATA_LINE.captures(line)?;

    Some(ParsedLine {
        sequence: caps[1].to_string(),
        code: caps[2].to_string(),
        raw_description: caps[3].trim().to_string(),
        source_code: caps[4].to_string(),
    })
}

/// Parse a whole decoded catalog. The first line is always the header and
/// is skipped even if it happens to look like data.
pub fn parse_source(text: &str) -> Vec<ParsedLine> {
    text.lines().skip(1).filter_map(parse_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_line() {
        let line = "      1  A00   Colera                                       A00,";
        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.sequence, "1");
        assert_eq!(parsed.code, "A00");
        assert_eq!(parsed.raw_description, "Colera");
        assert_eq!(parsed.source_code, "A00");
    }

    #[test]
    fn parses_subcategory_line() {
        let line = "     39  F10.0 Intox aguda                                  F100,";
        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.sequence, "39");
        assert_eq!(parsed.code, "F10.0");
        assert_eq!(parsed.raw_description, "Intox aguda");
        assert_eq!(parsed.source_code, "F100");
    }

    #[test]
    fn description_keeps_inner_spaces() {
        let line = "    120  A15   Tuberc respirat c/ conf bacteriol e histolog  A15,";
        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.raw_description, "Tuberc respirat c/ conf bacteriol e histolog");
    }

    #[test]
    fn trailing_comma_and_whitespace_optional() {
        assert!(parse_line("  7  B20  Doenc p/HIV  B20").is_some());
        assert!(parse_line("  7  B20  Doenc p/HIV  B20,   ").is_some());
        assert!(parse_line("  7  B20  Doenc p/HIV  B20,\r").is_some());
    }

    #[test]
    fn rejects_non_data_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("CID-10 Categorias 2020").is_none());
        assert!(parse_line("; Arquivo de conversao").is_none());
        assert!(parse_line("  12  a00  minusculo  A00,").is_none());
        assert!(parse_line("  12  A0  curto  A0,").is_none());
        assert!(parse_line("  12  A00.12  duas casas  A0012,").is_none());
        // no trailing source code column
        assert!(parse_line("  12  A00").is_none());
    }

    #[test]
    fn skips_header_line() {
        let text = "CID-10 Categorias 2020\n      1  A00   Colera          A00,\n";
        let parsed = parse_source(text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].code, "A00");
    }

    #[test]
    fn skips_header_even_when_it_matches() {
        let text = "      1  A00   Colera   A00,\n      2  A01   Febres tifoide e paratifoide   A01,\n";
        let parsed = parse_source(text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].code, "A01");
    }

    #[test]
    fn preserves_source_order_and_skips_noise() {
        let text = "header\n\
                    \n\
                    \x20     3  A02   Outr infecc p/ Salmonella   A02,\n\
                    rodape qualquer\n\
                    \x20     1  A00   Colera   A00,\r\n";
        let codes: Vec<String> = parse_source(text).into_iter().map(|p| p.code).collect();
        assert_eq!(codes, vec!["A02", "A00"]);
    }

    #[test]
    fn accented_descriptions_survive() {
        let line = "     55  K29   Gastrite e duodenite crônica   K29,";
        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.raw_description, "Gastrite e duodenite crônica");
    }

    #[test]
    fn sequence_of_any_length_is_data() {
        let parsed = parse_line("  4294967296  A00   Colera   A00,").unwrap();
        assert_eq!(parsed.sequence, "4294967296");
        assert_eq!(parsed.code, "A00");

        let huge = "  123456789012345678901234567890  B20  Doenc p/HIV  B20,";
        assert_eq!(parse_line(huge).unwrap().code, "B20");
    }

    #[test]
    fn empty_source_yields_nothing() {
        assert!(parse_source("").is_empty());
        assert!(parse_source("only a header").is_empty());
    }
}
