//! Parses the single-record, comma-separated text files the converter accepts.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::Result;
use crate::types::{NumericKind, NumericSequence};

/// Parses the first record of `text` as comma-separated values of `kind`.
///
/// Fields are unquoted and trimmed by the CSV reader. Empty or unparsable
/// fields are skipped and logged, so a stray trailing comma does not fail the
/// whole file. Values that parse but do not fit `kind` are an error.
pub fn parse_csv(text: &str, kind: NumericKind) -> Result<NumericSequence> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Ok(NumericSequence::empty(kind));
    }

    if kind.is_float() {
        let values: Vec<f64> = record.iter().filter_map(parse_field::<f64>).collect();
        NumericSequence::from_f64s(kind, &values)
    } else {
        let values: Vec<i64> = record.iter().filter_map(parse_field::<i64>).collect();
        NumericSequence::from_i64s(kind, &values)
    }
}

fn parse_field<V: std::str::FromStr>(field: &str) -> Option<V> {
    if field.is_empty() {
        return None;
    }
    match field.parse::<V>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::debug!("skipping malformed CSV field {:?}", field);
            None
        }
    }
}
