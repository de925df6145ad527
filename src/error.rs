use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row rejected: {0}")]
    Classify(#[from] crate::classifier::ClassifyError),

    #[error("Not signed in. Run `ledgerly login --email <address>` first.")]
    NotSignedIn,

    #[error("Invalid amount: {0} (must be a number greater than zero)")]
    InvalidAmount(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Category {category} does not apply to {kind} transactions")]
    CategoryMismatch { category: String, kind: String },

    #[error("Transaction not found: {0}")]
    TransactionNotFound(i64),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
