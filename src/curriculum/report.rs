use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::Serialize;

use super::{
    dependency::{
        evaluate,
        Diagnostic,
    },
    PlacementIndex,
};
use crate::core::{
    utils::contains_kanji,
    Level,
    Record,
    RecordId,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    pub id: RecordId,
    pub glyph: String,
    pub level: Level,
    pub diagnostic: Diagnostic,
}

/// Records placed at `level`, in their within-level order.
pub fn level_view(records: &[Record], level: Level) -> Vec<&Record> {
    let mut view: Vec<&Record> = records.iter().filter(|record| record.level == level).collect();
    view.sort_by_key(|record| record.order);
    view
}

/// Evaluates every record against one index snapshot, keeping input order.
pub fn evaluate_all(records: &[Record], index: &PlacementIndex) -> Vec<RecordReport> {
    records
        .par_iter()
        .map(|record| RecordReport {
            id: record.id.clone(),
            glyph: record.glyph.clone(),
            level: record.level,
            diagnostic: evaluate(record, index),
        })
        .collect()
}

pub fn warnings(records: &[Record], index: &PlacementIndex) -> Vec<RecordReport> {
    evaluate_all(records, index)
        .into_iter()
        .filter(|report| report.diagnostic.has_violations())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub radicals: usize,
    pub kanji: usize,
    pub occupied_levels: usize,
    pub kanji_glyphs: usize,
    pub violations: usize,
}

impl Statistics {
    pub fn collect(records: &[Record], index: &PlacementIndex) -> Self {
        let occupied: BTreeSet<Level> = records.iter().map(|record| record.level).collect();

        Statistics {
            total: records.len(),
            radicals: records.iter().filter(|record| record.kind.is_radical()).count(),
            kanji: records.iter().filter(|record| record.kind.is_kanji()).count(),
            occupied_levels: occupied.len(),
            kanji_glyphs: records.iter().filter(|record| contains_kanji(&record.glyph)).count(),
            violations: warnings(records, index).len(),
        }
    }
}
