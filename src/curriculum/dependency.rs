use serde::Serialize;

use super::PlacementIndex;
use crate::core::{
    Level,
    Record,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDetail {
    pub glyph: String,
    pub level: Option<Level>, // None when the glyph is not in the loaded set
}

/// Dependency check result for one record against one placement index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Components placed strictly after the record's level, in component order.
    pub violations: Vec<String>,
    pub component_details: Vec<ComponentDetail>,
    /// Highest level among the known components.
    pub suggested_level: Option<Level>,
}

impl Diagnostic {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// The level to offer as a fix, only when there is something to fix.
    pub fn fix_level(&self) -> Option<Level> {
        if self.has_violations() {
            self.suggested_level
        } else {
            None
        }
    }

    pub fn unknown_components(&self) -> impl Iterator<Item = &str> {
        self.component_details
            .iter()
            .filter(|detail| detail.level.is_none())
            .map(|detail| detail.glyph.as_str())
    }
}

/// Checks that every known component of `record` sits at or before its level.
///
/// Components missing from `index` are reported with an unknown level and
/// never count as violations. A component sharing the record's level is fine.
pub fn evaluate(record: &Record, index: &PlacementIndex) -> Diagnostic {
    let mut violations = Vec::new();
    let mut component_details = Vec::with_capacity(record.components.len());
    let mut suggested_level: Option<Level> = None;

    for glyph in &record.components {
        let level = index.level_of(glyph);
        component_details.push(ComponentDetail { glyph: glyph.clone(), level });

        if let Some(level) = level {
            suggested_level = suggested_level.max(Some(level));
            if level > record.level {
                violations.push(glyph.clone());
            }
        }
    }

    Diagnostic { violations, component_details, suggested_level }
}
