use std::collections::HashMap;

use tracing::{
    debug,
    info,
};

use super::{
    dependency::evaluate,
    PlacementIndex,
};
use crate::core::{
    Level,
    Record,
    RecordId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Level, to: Level, order: i64 },
    Unchanged,
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// The working set of records. Single owner, single writer.
///
/// `move_to_level` is the only mutation of individual records; `replace`
/// swaps the whole set for a new ingestion. Both bump the generation so a
/// previously built [`PlacementIndex`] can be recognised as stale.
#[derive(Debug, Clone, Default)]
pub struct Curriculum {
    records: Vec<Record>,
    positions: HashMap<RecordId, usize>,
    generation: u64,
}

impl Curriculum {
    pub fn new(records: Vec<Record>) -> Self {
        let positions = Self::index_positions(&records);
        Curriculum { records, positions, generation: 0 }
    }

    fn index_positions(records: &[Record]) -> HashMap<RecordId, usize> {
        records.iter().enumerate().map(|(pos, record)| (record.id.clone(), pos)).collect()
    }

    pub fn replace(&mut self, records: Vec<Record>) {
        info!(previous = self.records.len(), loaded = records.len(), "replacing working set");
        self.positions = Self::index_positions(&records);
        self.records = records;
        self.generation += 1;
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.positions.get(id).map(|&pos| &self.records[pos])
    }

    /// First record in input order carrying `glyph`.
    pub fn find_by_glyph(&self, glyph: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.glyph == glyph)
    }

    /// Looks `key` up as an id first, then as a glyph.
    pub fn resolve(&self, key: &str) -> Option<&Record> {
        self.find(&RecordId::new(key)).or_else(|| self.find_by_glyph(key))
    }

    /// Index snapshot of the current generation.
    pub fn placement_index(&self) -> PlacementIndex {
        PlacementIndex::build(&self.records).at_generation(self.generation)
    }

    pub fn is_index_current(&self, index: &PlacementIndex) -> bool {
        index.generation() == self.generation
    }

    /// Moves a record to the end of `target`'s ordering.
    ///
    /// Unknown ids and moves to the record's current level leave the set
    /// untouched.
    pub fn move_to_level(&mut self, id: &RecordId, target: Level) -> MoveOutcome {
        let Some(&pos) = self.positions.get(id) else {
            debug!(%id, "move ignored: unknown record");
            return MoveOutcome::Unchanged;
        };

        let from = self.records[pos].level;
        if from == target {
            return MoveOutcome::Unchanged;
        }

        // The moved record is not at `target` yet, so every match is another record
        let order = self
            .records
            .iter()
            .filter(|record| record.level == target)
            .map(|record| record.order)
            .max()
            .map_or(1, |max| max.saturating_add(1));

        let record = &mut self.records[pos];
        record.level = target;
        record.order = order;
        self.generation += 1;

        info!(%id, glyph = %record.glyph, %from, to = %target, order, "moved record");
        MoveOutcome::Moved { from, to: target, order }
    }

    /// Moves a violating record to the level its components suggest.
    ///
    /// Records without violations, or without a known component, stay put.
    pub fn apply_suggestion(&mut self, id: &RecordId) -> MoveOutcome {
        let Some(record) = self.find(id) else {
            return MoveOutcome::Unchanged;
        };

        let index = self.placement_index();
        let fix_level = evaluate(record, &index).fix_level();
        match fix_level {
            Some(level) => self.move_to_level(id, level),
            None => MoveOutcome::Unchanged,
        }
    }
}

impl From<Vec<Record>> for Curriculum {
    fn from(records: Vec<Record>) -> Self {
        Curriculum::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordKind;

    fn record(glyph: &str, level: u8, order: i64) -> Record {
        Record::new(
            RecordId::new(glyph),
            Level::new(level).unwrap(),
            RecordKind::Kanji,
            order,
            glyph,
        )
    }

    fn level(value: u8) -> Level {
        Level::new(value).unwrap()
    }

    #[test]
    fn test_move_appends_to_destination() {
        let mut curriculum =
            Curriculum::new(vec![record("一", 1, 1), record("二", 2, 4), record("三", 2, 9)]);

        let outcome = curriculum.move_to_level(&RecordId::new("一"), level(2));
        assert_eq!(outcome, MoveOutcome::Moved { from: level(1), to: level(2), order: 10 });

        let moved = curriculum.find(&RecordId::new("一")).unwrap();
        assert_eq!(moved.level, level(2));
        assert_eq!(moved.order, 10);
    }

    #[test]
    fn test_move_to_empty_level_starts_at_one() {
        let mut curriculum = Curriculum::new(vec![record("一", 1, 7)]);

        curriculum.move_to_level(&RecordId::new("一"), level(40));
        assert_eq!(curriculum.records()[0].order, 1);
        assert_eq!(curriculum.records()[0].level, level(40));
    }

    #[test]
    fn test_noop_moves_keep_generation() {
        let mut curriculum = Curriculum::new(vec![record("一", 1, 1)]);
        let before = curriculum.records().to_vec();

        assert_eq!(curriculum.move_to_level(&RecordId::new("一"), level(1)), MoveOutcome::Unchanged);
        assert_eq!(
            curriculum.move_to_level(&RecordId::new("missing"), level(3)),
            MoveOutcome::Unchanged
        );
        assert_eq!(curriculum.records(), before.as_slice());
        assert_eq!(curriculum.generation(), 0);
    }

    #[test]
    fn test_move_invalidates_index() {
        let mut curriculum = Curriculum::new(vec![record("一", 1, 1)]);
        let index = curriculum.placement_index();
        assert!(curriculum.is_index_current(&index));

        curriculum.move_to_level(&RecordId::new("一"), level(5));
        assert!(!curriculum.is_index_current(&index));
        assert!(curriculum.is_index_current(&curriculum.placement_index()));
    }

    #[test]
    fn test_replace_resets_lookup() {
        let mut curriculum = Curriculum::new(vec![record("一", 1, 1)]);
        curriculum.replace(vec![record("二", 3, 1)]);

        assert!(curriculum.find(&RecordId::new("一")).is_none());
        assert!(curriculum.find(&RecordId::new("二")).is_some());
        assert_eq!(curriculum.generation(), 1);
    }

    #[test]
    fn test_resolve_prefers_id_then_glyph() {
        let mut first = record("木", 1, 1);
        first.id = RecordId::new("木-1");
        let mut second = record("木", 2, 1);
        second.id = RecordId::new("木-2");
        let curriculum = Curriculum::new(vec![first, second]);

        assert_eq!(curriculum.resolve("木-2").unwrap().level, level(2));
        assert_eq!(curriculum.resolve("木").unwrap().level, level(1));
        assert!(curriculum.resolve("林").is_none());
    }

    #[test]
    fn test_apply_suggestion_only_fixes_violations() {
        let composite = record("林", 2, 1).with_components(["木", "木"]);
        let mut curriculum = Curriculum::new(vec![record("木", 6, 3), composite]);

        let outcome = curriculum.apply_suggestion(&RecordId::new("林"));
        assert_eq!(outcome, MoveOutcome::Moved { from: level(2), to: level(6), order: 4 });

        // Already satisfied now
        assert_eq!(curriculum.apply_suggestion(&RecordId::new("林")), MoveOutcome::Unchanged);
        assert_eq!(curriculum.apply_suggestion(&RecordId::new("木")), MoveOutcome::Unchanged);
    }
}
