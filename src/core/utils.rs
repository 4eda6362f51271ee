use std::sync::OnceLock;

use regex::Regex;
use wana_kana::utils::is_char_kanji;

/// Reads the integer at the start of `text`, ignoring anything after the digits.
///
/// Mirrors how spreadsheet exports are usually read leniently: `" 12"` and
/// `"12abc"` are both 12, `"abc"` and `""` are `None`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    static LEADING_INT: OnceLock<Regex> = OnceLock::new();
    let re = LEADING_INT.get_or_init(|| Regex::new(r"^\s*([+-]?[0-9]+)").unwrap());

    let digits = re.captures(text)?.get(1)?.as_str();
    match digits.parse::<i64>() {
        Ok(value) => Some(value),
        // Too many digits for i64, saturate in the direction of the sign
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Case-insensitive containment used for free-text fields.
pub fn text_matches_search(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    text.to_lowercase().contains(&query.to_lowercase())
}

pub fn contains_kanji(text: &str) -> bool {
    text.chars().any(is_char_kanji)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+4"), Some(4));
        assert_eq!(parse_leading_int("Level"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_parse_leading_int_ignores_full_width_digits() {
        assert_eq!(parse_leading_int("１２"), None);
        assert_eq!(parse_leading_int("３"), None);
        assert_eq!(parse_leading_int("1２"), Some(1));
    }

    #[test]
    fn test_text_matches_search() {
        assert!(text_matches_search("Tree", "tree"));
        assert!(text_matches_search("forest", "RES"));
        assert!(text_matches_search("anything", ""));
        assert!(!text_matches_search("water", "fire"));
    }

    #[test]
    fn test_contains_kanji() {
        assert!(contains_kanji("木"));
        assert!(contains_kanji("林です"));
        assert!(!contains_kanji("ひらがな"));
        assert!(!contains_kanji("stick"));
    }
}
