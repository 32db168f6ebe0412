use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientbookError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Source unavailable ({destination}): {reason}")]
    SourceUnavailable { destination: String, reason: String },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("No column matching {0}")]
    MissingColumn(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl ClientbookError {
    pub fn unavailable(destination: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            destination: destination.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientbookError>;
