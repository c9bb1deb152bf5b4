//! Error types for SmartFinance

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("No transactions found in the uploaded table")]
    EmptyData,

    #[error("Row {row}: invalid {column} value '{value}': {reason}")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("Row {row}: expected at most {expected} fields, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error came from a missing required column
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Check if this error came from an empty table
    pub fn is_empty_data(&self) -> bool {
        matches!(self, Self::EmptyData)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_names_columns() {
        let err = Error::Schema {
            missing: vec!["kategori".to_string(), "jumlah".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required column(s): kategori, jumlah"
        );
        assert!(err.is_schema());
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::Parse {
            row: 3,
            column: "jumlah",
            value: "abc".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Row 3: invalid jumlah value 'abc': not a number"
        );
    }

    #[test]
    fn test_ragged_row_display() {
        let err = Error::RaggedRow {
            row: 2,
            expected: 3,
            found: 5,
        };
        assert_eq!(err.to_string(), "Row 2: expected at most 3 fields, found 5");
    }
}
