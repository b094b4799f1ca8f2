//! Heuristic insight model types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BoqLensError;

/// Category of a generated insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// How concentrated the project cost is across its line items.
    CostConcentration,
    /// A single line item carries an outsized share of the total.
    DominantItem,
    /// A keyword-matched value-engineering suggestion for one item.
    ValueEngineering,
}

impl InsightKind {
    /// Stable string form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CostConcentration => "cost_concentration",
            Self::DominantItem => "dominant_item",
            Self::ValueEngineering => "value_engineering",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = BoqLensError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cost_concentration" => Ok(Self::CostConcentration),
            "dominant_item" => Ok(Self::DominantItem),
            "value_engineering" => Ok(Self::ValueEngineering),
            other => Err(BoqLensError::Database(format!("unknown insight kind '{other}'"))),
        }
    }
}

/// One rule-generated recommendation attached to a project.
///
/// The savings bounds, when present, are currency amounts derived from the
/// matched rule's percentage range applied to the item's total cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub project_id: String,
    pub kind: InsightKind,
    /// Item the insight refers to, when it is item-specific.
    pub item_code: Option<String>,
    pub title: String,
    pub detail: String,
    pub savings_min: Option<f64>,
    pub savings_max: Option<f64>,
    pub created_at: i64,
}
