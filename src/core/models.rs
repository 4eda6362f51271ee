use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// A curriculum level. Always within `Level::MIN..=Level::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const COUNT: u8 = 72;
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(Self::COUNT);

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0).contains(&value).then_some(Level(value))
    }

    /// Saturates any integer into the valid range.
    pub fn clamped(value: i64) -> Self {
        Level(value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Level> {
        (Self::MIN.0..=Self::MAX.0).map(Level)
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value).ok_or_else(|| format!("level {} is outside 1..={}", value, Self::COUNT))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    /// Ids synthesized at ingestion: glyph plus the physical line it came from.
    pub fn from_row(glyph: &str, line_index: usize) -> Self {
        RecordId(format!("{}-{}", glyph, line_index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Radical,
    #[default]
    Kanji,
    Other(String),
}

impl RecordKind {
    pub fn from_field(field: &str) -> Self {
        let field = field.trim();
        if field.is_empty() || field.eq_ignore_ascii_case("kanji") {
            RecordKind::Kanji
        } else if field.eq_ignore_ascii_case("radical") {
            RecordKind::Radical
        } else {
            RecordKind::Other(field.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RecordKind::Radical => "Radical",
            RecordKind::Kanji => "Kanji",
            RecordKind::Other(label) => label,
        }
    }

    // Loose matching so labels like "Kanji (jinmeiyō)" still count.
    pub fn is_radical(&self) -> bool {
        self.label().to_lowercase().contains("radical")
    }

    pub fn is_kanji(&self) -> bool {
        self.label().to_lowercase().contains("kanji")
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One character entry of the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub level: Level,
    pub kind: RecordKind,
    pub order: i64,               // Rank within `level` only
    pub glyph: String,            // Dependency lookup key, not guaranteed unique
    pub meaning_primary: String,
    pub meaning_secondary: String,
    pub components: Vec<String>,  // Glyphs this character is built from
    pub source_fields: Vec<String>, // Original row, replayed on export
}

impl Record {
    pub fn new(id: RecordId, level: Level, kind: RecordKind, order: i64, glyph: &str) -> Self {
        Record {
            id,
            level,
            kind,
            order,
            glyph: glyph.to_string(),
            meaning_primary: String::new(),
            meaning_secondary: String::new(),
            components: Vec::new(),
            source_fields: Vec::new(),
        }
    }

    pub fn with_meanings(mut self, primary: &str, secondary: &str) -> Self {
        self.meaning_primary = primary.to_string();
        self.meaning_secondary = secondary.to_string();
        self
    }

    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bounds() {
        assert_eq!(Level::new(0), None);
        assert_eq!(Level::new(1), Some(Level::MIN));
        assert_eq!(Level::new(72), Some(Level::MAX));
        assert_eq!(Level::new(73), None);

        assert_eq!(Level::clamped(-5), Level::MIN);
        assert_eq!(Level::clamped(500), Level::MAX);
        assert_eq!(Level::clamped(30).get(), 30);

        assert_eq!(Level::all().count(), 72);
        assert_eq!(Level::all().next(), Some(Level::MIN));
    }

    #[test]
    fn test_level_serde_rejects_out_of_range() {
        let level: Level = serde_json::from_str("12").unwrap();
        assert_eq!(level.get(), 12);
        assert!(serde_json::from_str::<Level>("0").is_err());
        assert!(serde_json::from_str::<Level>("73").is_err());
    }

    #[test]
    fn test_record_kind_parsing() {
        assert_eq!(RecordKind::from_field("Radical"), RecordKind::Radical);
        assert_eq!(RecordKind::from_field("radical"), RecordKind::Radical);
        assert_eq!(RecordKind::from_field(""), RecordKind::Kanji);
        assert_eq!(RecordKind::from_field("KANJI"), RecordKind::Kanji);
        assert_eq!(RecordKind::default(), RecordKind::from_field(""));
        assert_eq!(RecordKind::from_field("Vocabulary"), RecordKind::Other("Vocabulary".into()));

        let variant = RecordKind::from_field("Radical (variant)");
        assert!(variant.is_radical());
        assert!(!variant.is_kanji());
        assert_eq!(variant.to_string(), "Radical (variant)");
    }
}
