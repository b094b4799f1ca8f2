//! Spreadsheet ingestion

pub mod row_parser;

pub use row_parser::{parse_row, ParsedRow, RawRow};
