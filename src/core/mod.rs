pub mod errors;
pub mod models;
pub mod utils;

pub use errors::ArchitectError;
pub use models::{
    Level,
    Record,
    RecordId,
    RecordKind,
};
