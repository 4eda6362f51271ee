use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchitectError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Level {0} is outside 1..=72")]
    InvalidLevel(i64),

    #[error("No record matches '{0}'")]
    RecordNotFound(String),

    #[error("ArchitectError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for ArchitectError {
    fn from(error: std::io::Error) -> Self {
        ArchitectError::Io(Box::new(error))
    }
}
