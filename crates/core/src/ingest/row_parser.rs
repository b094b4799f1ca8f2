//! Spreadsheet row normalization
//!
//! Decoded rows arrive as string-keyed JSON maps whose headers vary between
//! BoQ templates. Each field resolves through an ordered alias list (see
//! `boqlens_domain::constants`); the first present, non-empty candidate wins.
//!
//! Parsing is deliberately lenient: unreadable numbers become 0 and rows that
//! are unusable after normalization are dropped silently rather than failing
//! the whole spreadsheet. Callers count rejections via the `None` returns.

use boqlens_domain::constants::{
    DESCRIPTION_COLUMNS, ITEM_CODE_COLUMNS, QUANTITY_COLUMNS, TOTAL_COST_COLUMNS, UNIT_COLUMNS,
    UNIT_RATE_COLUMNS,
};
use serde_json::{Map, Value};

/// A decoded spreadsheet row keyed by column header.
pub type RawRow = Map<String, Value>;

/// One normalized BoQ row before hierarchy derivation and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub item_code: String,
    pub description: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_rate: f64,
    pub total_cost: f64,
}

/// Normalize one raw row into a [`ParsedRow`].
///
/// Returns `None` when the row has no usable item code or description, or
/// when its final total cost is not strictly positive. A missing or
/// non-positive total-cost cell falls back to `quantity * unit_rate`.
pub fn parse_row(row: &RawRow) -> Option<ParsedRow> {
    let item_code = string_field(row, ITEM_CODE_COLUMNS)?;
    let description = string_field(row, DESCRIPTION_COLUMNS)?;

    let quantity = number_field(row, QUANTITY_COLUMNS);
    let unit = string_field(row, UNIT_COLUMNS);
    let unit_rate = number_field(row, UNIT_RATE_COLUMNS);

    let mut total_cost = number_field(row, TOTAL_COST_COLUMNS);
    if total_cost <= 0.0 {
        total_cost = quantity * unit_rate;
    }
    if total_cost <= 0.0 {
        return None;
    }

    Some(ParsedRow { item_code, description, quantity, unit, unit_rate, total_cost })
}

/// Resolve a text field: first alias with a non-empty value wins.
fn string_field(row: &RawRow, aliases: &[&str]) -> Option<String> {
    for key in aliases {
        match row.get(*key) {
            Some(Value::String(text)) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            // Numeric cells are legal for text fields (a code column may
            // decode as a number); render them verbatim.
            Some(Value::Number(number)) => return Some(number.to_string()),
            _ => {}
        }
    }
    None
}

/// Resolve a numeric field: first alias with a present, non-blank value is
/// parsed; an unparseable value counts as 0 rather than trying later aliases.
fn number_field(row: &RawRow, aliases: &[&str]) -> f64 {
    for key in aliases {
        match row.get(*key) {
            None | Some(Value::Null) => {}
            Some(Value::String(text)) if text.trim().is_empty() => {}
            Some(value) => return numeric_value(value).unwrap_or(0.0),
        }
    }
    0.0
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        // Tolerate thousands separators ("1,250.50") common in exports.
        Value::String(text) => text.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}
