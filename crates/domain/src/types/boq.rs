//! Bill-of-Quantities model types
//!
//! These types represent the persisted schema and are used by the repository
//! ports. A `Project` owns its `LineItem`s: deleting a project cascades to
//! every row derived from its spreadsheet.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BoqLensError;

/// Lifecycle status of an uploaded project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Spreadsheet stored, not yet analysed.
    Uploaded,
    /// Line items parsed, ranked, and persisted.
    Processed,
}

impl ProjectStatus {
    /// Stable string form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Processed => "processed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = BoqLensError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "uploaded" => Ok(Self::Uploaded),
            "processed" => Ok(Self::Processed),
            other => {
                Err(BoqLensError::Database(format!("unknown project status '{other}'")))
            }
        }
    }
}

/// A construction project backed by one uploaded BoQ spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Path of the source spreadsheet relative to the file-store root.
    pub file_path: String,
    pub status: ProjectStatus,
    pub created_at: i64,
}

/// One normalized BoQ row.
///
/// `wbs_level` and `parent_item_code` are derived from the dotted item code
/// at ingestion time. The cumulative fields are populated by ranking and are
/// `None` on an item that has not been ranked yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub project_id: String,
    /// Dotted WBS code, e.g. `"1.2.3"`. Segments are not required to be
    /// numeric; codes like `"A.1"` are legal.
    pub item_code: String,
    pub description: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_rate: f64,
    pub total_cost: f64,
    /// 1-based hierarchy depth (count of dot-separated code segments).
    pub wbs_level: u32,
    /// Item code with its final segment removed; `None` for root items.
    pub parent_item_code: Option<String>,
    pub cumulative_cost: Option<f64>,
    pub cumulative_percentage: Option<f64>,
    pub is_pareto_critical: Option<bool>,
}

impl LineItem {
    /// Whether ranking marked this item Pareto-critical.
    pub fn is_critical(&self) -> bool {
        self.is_pareto_critical == Some(true)
    }
}
