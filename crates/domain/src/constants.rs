//! Application constants
//!
//! Centralized location for all domain-level constants. The column alias
//! tables are part of the ingestion contract: BoQ templates vary in how they
//! label columns, and a header is matched against each candidate in priority
//! order. Editing these tables changes which spreadsheets parse, so treat any
//! change as compatibility-relevant.

/// Candidate column headers for the WBS item code, in priority order.
pub const ITEM_CODE_COLUMNS: &[&str] = &["Item Code", "itemCode", "Code", "code"];

/// Candidate column headers for the item description.
pub const DESCRIPTION_COLUMNS: &[&str] = &["Description", "description", "Item", "item"];

/// Candidate column headers for the quantity.
pub const QUANTITY_COLUMNS: &[&str] = &["Quantity", "quantity", "Qty", "qty"];

/// Candidate column headers for the unit label.
pub const UNIT_COLUMNS: &[&str] = &["Unit", "unit"];

/// Candidate column headers for the unit rate.
pub const UNIT_RATE_COLUMNS: &[&str] = &["Unit Rate", "unitRate", "Rate", "rate"];

/// Candidate column headers for the total cost.
pub const TOTAL_COST_COLUMNS: &[&str] = &["Total Cost", "totalCost", "Total", "total"];

/// Cumulative-percentage threshold (inclusive) at or below which a ranked
/// item counts as Pareto-critical.
pub const PARETO_CRITICAL_THRESHOLD: f64 = 80.0;

/// Share of the ranked total above which a single line item is reported as
/// dominating the project cost.
pub const DOMINANT_ITEM_SHARE: f64 = 30.0;

/// Default SQLite connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;
