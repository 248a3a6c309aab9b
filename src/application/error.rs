use std::num::ParseIntError;

use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Line {line}: expected 5 columns, found {found}")]
    ColumnCount { line: u64, found: usize },

    #[error("Line {line}: invalid {field} '{value}': {source}")]
    InvalidInteger {
        line: u64,
        field: &'static str,
        value: String,
        source: ParseIntError,
    },
}

impl LedgerError {
    /// True for errors caused by the content of an import rather than by I/O.
    pub fn is_format_error(&self) -> bool {
        match self {
            LedgerError::Io(_) => false,
            LedgerError::Csv(err) => !err.is_io_error(),
            _ => true,
        }
    }
}
