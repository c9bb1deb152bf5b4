//! Transaction table parsing and schema validation
//!
//! The uploaded table must carry `tanggal` (date), `kategori` (category) and
//! `jumlah` (amount) columns. Column order does not matter and extra columns
//! are ignored. Parsing is all-or-nothing: the first bad field or a row with
//! more fields than the header fails the whole table. Short rows are read
//! with the missing fields empty.

use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionSet};

const DATE_COLUMN: &str = "tanggal";
const CATEGORY_COLUMN: &str = "kategori";
const AMOUNT_COLUMN: &str = "jumlah";

/// Columns every uploaded table must have
const REQUIRED_COLUMNS: [&str; 3] = [DATE_COLUMN, CATEGORY_COLUMN, AMOUNT_COLUMN];

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    date: usize,
    category: usize,
    amount: usize,
}

/// Check a header row for the required columns
///
/// Header names are compared after trimming surrounding whitespace.
/// Returns every missing column in the error, not just the first.
fn validate_headers(headers: &StringRecord) -> Result<ColumnIndex> {
    let find = |name: &str| headers.iter().position(|h| h.trim() == name);

    let date = find(DATE_COLUMN);
    let category = find(CATEGORY_COLUMN);
    let amount = find(AMOUNT_COLUMN);

    match (date, category, amount) {
        (Some(date), Some(category), Some(amount)) => Ok(ColumnIndex {
            date,
            category,
            amount,
        }),
        _ => {
            let missing = REQUIRED_COLUMNS
                .iter()
                .zip([date, category, amount])
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            Err(Error::Schema { missing })
        }
    }
}

/// Parse a comma-delimited transaction table
pub fn parse_csv<R: Read>(reader: R) -> Result<TransactionSet> {
    parse_csv_with_delimiter(reader, b',')
}

/// Parse a transaction table with a custom delimiter
pub fn parse_csv_with_delimiter<R: Read>(mut reader: R, delimiter: u8) -> Result<TransactionSet> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    let fingerprint = hex::encode(Sha256::digest(&raw));

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(raw.as_slice());

    let headers = rdr.headers()?.clone();
    let columns = validate_headers(&headers)?;

    let mut transactions = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        let row = idx + 1;
        // Skip fully blank lines (e.g. trailing separators)
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if record.len() > headers.len() {
            return Err(Error::RaggedRow {
                row,
                expected: headers.len(),
                found: record.len(),
            });
        }
        transactions.push(parse_record(&record, row, columns)?);
    }

    let set = TransactionSet::new(transactions, fingerprint);
    let refunds = set.refund_count();
    if refunds > 0 {
        warn!(refunds, "Table contains negative amounts, treating them as refunds");
    }

    debug!(
        rows = set.len(),
        categories = set.categories().len(),
        "Parsed transaction table"
    );
    Ok(set)
}

fn parse_record(record: &StringRecord, row: usize, columns: ColumnIndex) -> Result<Transaction> {
    let date_str = required_field(record, columns.date, row, DATE_COLUMN)?;
    let date = parse_date(date_str).ok_or_else(|| Error::Parse {
        row,
        column: DATE_COLUMN,
        value: date_str.to_string(),
        reason: "unrecognized date format".into(),
    })?;

    let category = required_field(record, columns.category, row, CATEGORY_COLUMN)?.to_string();

    let amount_str = required_field(record, columns.amount, row, AMOUNT_COLUMN)?;
    let amount = parse_amount(amount_str).map_err(|reason| Error::Parse {
        row,
        column: AMOUNT_COLUMN,
        value: amount_str.to_string(),
        reason,
    })?;

    Ok(Transaction {
        row,
        date,
        category,
        amount,
    })
}

/// Trimmed, non-empty field value
fn required_field<'r>(
    record: &'r StringRecord,
    idx: usize,
    row: usize,
    column: &'static str,
) -> Result<&'r str> {
    let value = record.get(idx).map(str::trim).unwrap_or("");
    if value.is_empty() {
        return Err(Error::Parse {
            row,
            column,
            value: String::new(),
            reason: "value is missing".into(),
        });
    }
    Ok(value)
}

/// Parse a date string in various common formats
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%Y/%m/%d", // 2024/01/15
        "%m/%d/%Y", // 01/15/2024
        "%d/%m/%Y", // 15/01/2024 (only reached when day > 12)
        "%d-%m-%Y", // 15-01-2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// Parse an amount string, handling "Rp" prefixes, commas and accounting
/// parentheses
fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let trimmed = s.trim();
    let unprefixed = ["Rp", "RP", "rp", "IDR"]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);

    let cleaned: String = unprefixed
        .trim()
        .replace([',', ' ', '_'], "")
        .replace('(', "-")
        .replace(')', "");

    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| "not a number".to_string())?;

    if !amount.is_finite() {
        return Err("amount must be finite".into());
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15"), Some(expected));
        assert_eq!(parse_date("2024/01/15"), Some(expected));
        assert_eq!(parse_date("15/01/2024"), Some(expected));
        assert_eq!(parse_date("01/15/2024"), Some(expected));
        assert_eq!(parse_date("2024-01-15 08:30:00"), Some(expected));
        assert_eq!(parse_date("kemarin"), None);
    }

    #[test]
    fn test_parse_date_slash_is_month_first() {
        assert_eq!(
            parse_date("03/04/2024"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
        );
        // Day-first only when the first part cannot be a month
        assert_eq!(
            parse_date("25/04/2024"),
            Some(NaiveDate::from_ymd_opt(2024, 4, 25).unwrap())
        );
    }

    #[test]
    fn test_parse_csv_ambiguous_slash_date_month() {
        let csv = "tanggal,kategori,jumlah\n03/04/2024,transport,100\n";
        let set = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(set.transactions()[0].month(), crate::models::MonthKey::new(2024, 3));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("400000").unwrap(), 400000.0);
        assert_eq!(parse_amount("Rp 1,250,000").unwrap(), 1250000.0);
        assert_eq!(parse_amount("12500.50").unwrap(), 12500.5);
        assert_eq!(parse_amount("(5000)").unwrap(), -5000.0);
        assert_eq!(parse_amount("-750").unwrap(), -750.0);
        assert!(parse_amount("sepuluh ribu").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_parse_csv_basic() {
        let csv = "tanggal,kategori,jumlah\n2024-01-05,makanan,400000\n2024-01-10,hiburan,100000\n";
        let set = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(set.len(), 2);
        let first = &set.transactions()[0];
        assert_eq!(first.row, 1);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(first.category, "makanan");
        assert_eq!(first.amount, 400000.0);
        assert_eq!(set.categories(), vec!["makanan", "hiburan"]);
    }

    #[test]
    fn test_parse_csv_any_column_order_and_extra_columns() {
        let csv = "catatan,jumlah,tanggal,kategori\nmakan siang,25000,2024-02-01,makanan\n";
        let set = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.transactions()[0].amount, 25000.0);
        assert_eq!(set.transactions()[0].category, "makanan");
    }

    #[test]
    fn test_parse_csv_trims_headers_and_values() {
        let csv = " tanggal , kategori , jumlah \n 2024-02-01 , transport , 15000 \n";
        let set = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(set.transactions()[0].category, "transport");
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let csv = "tanggal,jumlah\n2024-01-05,400000\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        match err {
            Error::Schema { missing } => assert_eq!(missing, vec!["kategori".to_string()]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_csv_reports_all_missing_columns() {
        let csv = "date,category,amount\n2024-01-05,food,1\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required column(s): tanggal, kategori, jumlah"
        );
    }

    #[test]
    fn test_parse_csv_bad_amount_names_row() {
        let csv = "tanggal,kategori,jumlah\n2024-01-05,makanan,400000\n2024-01-06,makanan,banyak\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        match err {
            Error::Parse {
                row, column, value, ..
            } => {
                assert_eq!(row, 2);
                assert_eq!(column, "jumlah");
                assert_eq!(value, "banyak");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_csv_bad_date() {
        let csv = "tanggal,kategori,jumlah\n31/31/2024,makanan,400000\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { column: "tanggal", .. }));
    }

    #[test]
    fn test_parse_csv_empty_category_rejected() {
        let csv = "tanggal,kategori,jumlah\n2024-01-05,,400000\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { column: "kategori", row: 1, .. }));
    }

    #[test]
    fn test_parse_csv_short_row_rejected() {
        let csv = "tanggal,kategori,jumlah\n2024-01-05,makanan\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { column: "jumlah", .. }));
    }

    #[test]
    fn test_parse_csv_long_row_rejected() {
        let csv = "tanggal,kategori,jumlah\n2024-01-05,makanan,1000\n2024-01-06,makanan,1000,extra\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        match err {
            Error::RaggedRow {
                row,
                expected,
                found,
            } => {
                assert_eq!(row, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 4);
            }
            other => panic!("expected ragged row error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_csv_header_only_is_empty_set() {
        let set = parse_csv("tanggal,kategori,jumlah\n".as_bytes()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_parse_csv_skips_blank_lines() {
        let csv = "tanggal,kategori,jumlah\n2024-01-05,makanan,1000\n,,\n";
        let set = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_parse_csv_semicolon_delimiter() {
        let csv = "tanggal;kategori;jumlah\n2024-01-05;makanan;1000\n";
        let set = parse_csv_with_delimiter(csv.as_bytes(), b';').unwrap();
        assert_eq!(set.transactions()[0].amount, 1000.0);
    }

    #[test]
    fn test_parse_csv_negative_amount_is_refund() {
        let csv = "tanggal,kategori,jumlah\n2024-01-05,belanja,-50000\n";
        let set = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(set.refund_count(), 1);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let csv = "tanggal,kategori,jumlah\n2024-01-05,makanan,1000\n";
        let a = parse_csv(csv.as_bytes()).unwrap();
        let b = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let other = parse_csv("tanggal,kategori,jumlah\n2024-01-05,makanan,1001\n".as_bytes())
            .unwrap();
        assert_ne!(a.fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_validate_headers() {
        let headers = StringRecord::from(vec!["jumlah", "kategori", "tanggal"]);
        let columns = validate_headers(&headers).unwrap();
        assert_eq!(
            columns,
            ColumnIndex {
                date: 2,
                category: 1,
                amount: 0
            }
        );
    }
}
