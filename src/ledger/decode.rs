use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::Holding;

use super::{DecodeError, LedgerError};

/// Column order of the ledger. Header names in the file itself are ignored.
pub const COLUMNS: [&str; 8] = [
    "accountNumber",
    "name",
    "volume",
    "value",
    "avg",
    "isin",
    "currency",
    "type",
];

/// Shape of the delimited input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerFormat {
    pub delimiter: u8,
    /// Discard the first row.
    pub has_header: bool,
    /// `.` or `,`; applies to the numeric columns only.
    pub decimal_separator: char,
}

impl Default for LedgerFormat {
    fn default() -> Self {
        Self {
            delimiter: b';',
            has_header: true,
            decimal_separator: '.',
        }
    }
}

/// Read and decode a ledger file.
pub fn read_holdings(path: &Path, format: &LedgerFormat) -> Result<Vec<Holding>, LedgerError> {
    let file = File::open(path).map_err(|source| LedgerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let holdings = decode_holdings(file, format)?;
    debug!(path = %path.display(), rows = holdings.len(), "decoded ledger");
    Ok(holdings)
}

/// Decode ledger rows from any reader, preserving row order.
///
/// Stops at the first row that fails to decode.
pub fn decode_holdings<R: Read>(
    reader: R,
    format: &LedgerFormat,
) -> Result<Vec<Holding>, LedgerError> {
    let mut csv_in = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(format.has_header)
        .flexible(true)
        .from_reader(reader);

    let mut holdings = Vec::new();
    for record in csv_in.records() {
        let record = record?;
        holdings.push(decode_record(&record, format)?);
    }
    Ok(holdings)
}

fn decode_record(record: &StringRecord, format: &LedgerFormat) -> Result<Holding, DecodeError> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    if record.len() != COLUMNS.len() {
        return Err(DecodeError::ColumnCount {
            line,
            expected: COLUMNS.len(),
            found: record.len(),
        });
    }

    let text = |idx: usize| record.get(idx).unwrap_or_default().to_string();
    let number = |idx: usize| number_at(record, idx, line, format.decimal_separator);

    Ok(Holding {
        account_number: text(0),
        name: text(1),
        volume: number(2)?,
        value: number(3)?,
        avg: number(4)?,
        isin: text(5),
        currency: text(6),
        kind: text(7),
    })
}

fn number_at(
    record: &StringRecord,
    idx: usize,
    line: u64,
    decimal_separator: char,
) -> Result<Decimal, DecodeError> {
    let raw = record.get(idx).unwrap_or_default();
    parse_number(raw, decimal_separator).ok_or_else(|| DecodeError::InvalidNumber {
        line,
        column: COLUMNS[idx],
        value: raw.to_string(),
    })
}

/// Parse a numeric field, accepting plain and scientific notation.
pub fn parse_number(raw: &str, decimal_separator: char) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = if decimal_separator == '.' {
        trimmed.to_string()
    } else {
        trimmed.replace(decimal_separator, ".")
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}
