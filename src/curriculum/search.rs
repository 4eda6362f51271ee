use std::borrow::Cow;

use crate::core::{
    utils::text_matches_search,
    Record,
};

/// Glyphs match case-sensitively, meanings case-insensitively.
pub fn matches_search(record: &Record, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    record.glyph.contains(query)
        || text_matches_search(&record.meaning_primary, query)
        || text_matches_search(&record.meaning_secondary, query)
}

/// Filtered view of `records`. An empty query borrows the input as-is.
///
/// Dependency checks must keep running against the full set, since a
/// component can live in a record this view hides.
pub fn filter<'a>(records: &'a [Record], query: &str) -> Cow<'a, [Record]> {
    if query.is_empty() {
        return Cow::Borrowed(records);
    }

    Cow::Owned(records.iter().filter(|record| matches_search(record, query)).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Level,
        RecordId,
        RecordKind,
    };

    fn records() -> Vec<Record> {
        vec![
            Record::new(RecordId::new("木-0"), Level::MIN, RecordKind::Radical, 1, "木")
                .with_meanings("Tree", "wood"),
            Record::new(RecordId::new("林-1"), Level::MIN, RecordKind::Kanji, 2, "林")
                .with_meanings("Grove", "Woods"),
            Record::new(RecordId::new("Aa-2"), Level::MIN, RecordKind::Kanji, 3, "Aa")
                .with_meanings("", ""),
        ]
    }

    fn glyphs(view: &[Record]) -> Vec<&str> {
        view.iter().map(|record| record.glyph.as_str()).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let records = records();
        let view = filter(&records, "");
        assert!(matches!(view, Cow::Borrowed(_)));
        assert_eq!(view.as_ref(), records.as_slice());
    }

    #[test]
    fn test_meanings_match_case_insensitively() {
        let records = records();
        assert_eq!(glyphs(&filter(&records, "WOOD")), vec!["木", "林"]);
        assert_eq!(glyphs(&filter(&records, "grove")), vec!["林"]);
    }

    #[test]
    fn test_glyph_matches_case_sensitively() {
        let records = records();
        assert_eq!(glyphs(&filter(&records, "林")), vec!["林"]);
        assert_eq!(glyphs(&filter(&records, "Aa")), vec!["Aa"]);
        assert!(filter(&records, "aA").is_empty());
    }

    #[test]
    fn test_no_match() {
        let records = records();
        assert!(filter(&records, "fire").is_empty());
    }
}
