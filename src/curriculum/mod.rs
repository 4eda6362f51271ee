pub mod dependency;
pub mod engine;
pub mod placement;
pub mod report;
pub mod search;

pub use dependency::{
    evaluate,
    ComponentDetail,
    Diagnostic,
};
pub use engine::{
    Curriculum,
    MoveOutcome,
};
pub use placement::PlacementIndex;
pub use report::{
    evaluate_all,
    level_view,
    warnings,
    RecordReport,
    Statistics,
};
pub use search::filter;
