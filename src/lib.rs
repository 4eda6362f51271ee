//! Curriculum planner for kanji and radicals across 72 levels.
//!
//! Records are loaded from a curriculum sheet ([`parser`]), held in a
//! [`Curriculum`], and checked so that every component is introduced at or
//! before the level of the character built from it.

pub mod core;
pub mod curriculum;
pub mod parser;
pub mod persistence;

pub use crate::core::{
    ArchitectError,
    Level,
    Record,
    RecordId,
    RecordKind,
};
pub use curriculum::{
    evaluate,
    Curriculum,
    Diagnostic,
    MoveOutcome,
    PlacementIndex,
};
