use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid journal document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid trade type '{0}' (expected TP or SL)")]
    InvalidTradeType(String),

    #[error("Invalid outcome '{0}' (expected Profit or Loss)")]
    InvalidOutcome(String),

    #[error("Invalid risk:reward ratio '{0}' (expected 1:1 or 1:2)")]
    InvalidRatio(String),

    #[error("Please enter a valid pair name")]
    InvalidPair,

    #[error("Unknown trading pair: {0}")]
    UnknownPair(String),

    #[error("Trade not found: {0}")]
    TradeNotFound(String),

    #[error("Spreadsheet export failed: {0}")]
    Export(String),

    #[error("CSV export failed: {0}")]
    Csv(String),
}

impl From<rust_xlsxwriter::XlsxError> for JournalError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        JournalError::Export(err.to_string())
    }
}

impl From<csv::Error> for JournalError {
    fn from(err: csv::Error) -> Self {
        JournalError::Csv(err.to_string())
    }
}

impl From<tempfile::PersistError> for JournalError {
    fn from(err: tempfile::PersistError) -> Self {
        JournalError::Io(err.error)
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;
