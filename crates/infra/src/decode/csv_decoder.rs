//! CSV implementation of the `SpreadsheetDecoder` port.
//!
//! The first record is the header row. Cells are carried as strings verbatim;
//! numeric interpretation belongs to the row parser, which also keeps codes
//! like `"1.10"` from being mangled into numbers here.

use boqlens_core::analysis::ports::SpreadsheetDecoder;
use boqlens_core::RawRow;
use boqlens_domain::{BoqLensError, Result};
use serde_json::Value;

use crate::errors::InfraError;

/// Decoder for comma-separated BoQ exports.
pub struct CsvDecoder;

impl SpreadsheetDecoder for CsvDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RawRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(bytes);

        let headers = reader.headers().map_err(map_csv_error)?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(map_csv_error)?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            let mut row = RawRow::new();
            for (header, field) in headers.iter().zip(record.iter()) {
                if header.is_empty() {
                    continue;
                }
                row.insert(header.to_string(), Value::String(field.to_string()));
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

fn map_csv_error(err: csv::Error) -> BoqLensError {
    BoqLensError::from(InfraError::from(err))
}
