use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Journal entry not found: {0}")]
    JournalEntryNotFound(String),

    #[error("Invalid month key: {0}")]
    InvalidMonthKey(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
