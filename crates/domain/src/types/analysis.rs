//! Analysis and drill-down result types
//!
//! These are response models: `WbsAggregateRow` and `WbsBreakdown` are
//! recomputed on every request and never persisted.

use serde::{Deserialize, Serialize};

use super::boq::LineItem;

/// Summary returned by a full project analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub project_id: String,
    pub total_items: usize,
    /// Sum of `total_cost` over level-1 items only. Higher WBS levels roll
    /// up their children, so summing every row would double-count.
    pub total_project_cost: f64,
    pub pareto_critical_items: usize,
    /// Rows dropped by the lenient parser (missing code/description or
    /// non-positive cost).
    pub rejected_rows: usize,
    /// All surviving items, ranked by cost descending.
    pub items: Vec<LineItem>,
}

/// One aggregated row of a WBS drill-down, grouping every line item that
/// shares an item code at the requested level.
///
/// The cumulative fields are computed against the aggregate set's own total,
/// not the project grand total. `unit` and `unit_rate` carry the first-seen
/// value of the group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WbsAggregateRow {
    pub item_code: String,
    /// Distinct underlying descriptions, order-stable, joined with `"; "`.
    pub description: String,
    pub total_cost: f64,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_rate: f64,
    /// Number of raw line items folded into this row.
    pub item_count: usize,
    pub cumulative_cost: Option<f64>,
    pub cumulative_percentage: Option<f64>,
    pub is_pareto_critical: Option<bool>,
}

/// Drill-down response for one WBS level of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WbsBreakdown {
    pub project_id: String,
    pub level: u32,
    pub parent_item_code: Option<String>,
    /// Total cost of the selected subset; the 100% basis for its rows.
    pub total_cost: f64,
    pub rows: Vec<WbsAggregateRow>,
}
