use std::path::PathBuf;

/// A single row that could not be turned into a holding.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: column {column:?} is not a number: {value:?}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Failed to open ledger {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed ledger: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
