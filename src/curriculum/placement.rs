use std::collections::HashMap;

use tracing::debug;

use crate::core::{
    Level,
    Record,
};

/// Glyph -> level lookup derived from one generation of the working set.
///
/// The index is immutable once built. Any move in the [`Curriculum`] it came
/// from makes it stale; build a new one rather than patching this one.
///
/// [`Curriculum`]: super::Curriculum
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementIndex {
    levels: HashMap<String, Level>,
    generation: u64,
}

impl PlacementIndex {
    /// Later records with the same glyph overwrite earlier ones.
    pub fn build(records: &[Record]) -> Self {
        let mut levels = HashMap::with_capacity(records.len());
        for record in records {
            levels.insert(record.glyph.clone(), record.level);
        }

        if levels.len() < records.len() {
            debug!(
                records = records.len(),
                glyphs = levels.len(),
                "placement index collapsed duplicate glyphs (last occurrence wins)"
            );
        }

        PlacementIndex { levels, generation: 0 }
    }

    pub(crate) fn at_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn level_of(&self, glyph: &str) -> Option<Level> {
        self.levels.get(glyph).copied()
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.levels.contains_key(glyph)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
