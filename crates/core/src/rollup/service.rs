//! WBS rollup service - core business logic
//!
//! Aggregates a project's persisted line items at one WBS level for
//! drill-down. Level 1 selects the root items; deeper levels select the
//! direct children of a parent code (one level down, never all descendants).
//! The aggregated rows are re-ranked against the subset's own total, so the
//! critical flag is always relative to the scope being viewed.

use std::collections::HashMap;
use std::sync::Arc;

use boqlens_domain::{BoqLensError, LineItem, Result, WbsAggregateRow, WbsBreakdown};
use tracing::debug;

use crate::analysis::ports::{LineItemStore, ProjectStore};
use crate::pareto;

/// WBS drill-down service
pub struct WbsRollupService {
    projects: Arc<dyn ProjectStore>,
    line_items: Arc<dyn LineItemStore>,
}

impl WbsRollupService {
    /// Create a new rollup service
    pub fn new(projects: Arc<dyn ProjectStore>, line_items: Arc<dyn LineItemStore>) -> Self {
        Self { projects, line_items }
    }

    /// Aggregate a project's line items at `level`, optionally under a
    /// parent code.
    ///
    /// Fails with `NotFound` for an unknown project, and `InvalidInput`
    /// when `level >= 2` and no parent code is given. An empty selection is
    /// not an error: it yields a breakdown with zero total and no rows.
    pub async fn breakdown(
        &self,
        project_id: &str,
        level: u32,
        parent_item_code: Option<&str>,
    ) -> Result<WbsBreakdown> {
        self.projects.get_project(project_id).await?.ok_or_else(|| {
            BoqLensError::NotFound(format!("project {project_id} does not exist"))
        })?;

        let parent = if level >= 2 {
            let parent = parent_item_code.filter(|code| !code.trim().is_empty()).ok_or_else(
                || {
                    BoqLensError::InvalidInput(
                        "parent item code is required below the root level".into(),
                    )
                },
            )?;
            Some(parent.trim())
        } else {
            None
        };

        let selected = self.line_items.list_for_level(project_id, level).await?;
        let selected: Vec<LineItem> = match parent {
            // Direct children only: the level filter already pins the
            // segment count, the prefix pins the branch.
            Some(parent) => {
                let prefix = format!("{parent}.");
                selected
                    .into_iter()
                    .filter(|item| item.item_code.starts_with(&prefix))
                    .collect()
            }
            None => selected,
        };

        let mut rows = group_by_item_code(selected);
        let total_cost = pareto::rank(&mut rows);

        debug!(project_id, level, rows = rows.len(), "wbs breakdown computed");

        Ok(WbsBreakdown {
            project_id: project_id.to_string(),
            level,
            parent_item_code: parent.map(str::to_string),
            total_cost,
            rows,
        })
    }
}

/// Fold line items into one aggregate row per item code.
///
/// Input order is preserved for first-seen groups, descriptions merge
/// distinct values order-stably, and unit/rate carry the first-seen value.
/// Groups with a blank code or non-positive summed cost are dropped.
fn group_by_item_code(items: Vec<LineItem>) -> Vec<WbsAggregateRow> {
    let mut rows: Vec<WbsAggregateRow> = Vec::new();
    let mut descriptions: Vec<Vec<String>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        match index.get(&item.item_code) {
            Some(&position) => {
                let row = &mut rows[position];
                row.total_cost += item.total_cost;
                row.quantity += item.quantity;
                row.item_count += 1;
                let seen = &mut descriptions[position];
                if !seen.contains(&item.description) {
                    seen.push(item.description);
                }
            }
            None => {
                index.insert(item.item_code.clone(), rows.len());
                descriptions.push(vec![item.description.clone()]);
                rows.push(WbsAggregateRow {
                    item_code: item.item_code,
                    description: String::new(),
                    total_cost: item.total_cost,
                    quantity: item.quantity,
                    unit: item.unit,
                    unit_rate: item.unit_rate,
                    item_count: 1,
                    cumulative_cost: None,
                    cumulative_percentage: None,
                    is_pareto_critical: None,
                });
            }
        }
    }

    let mut merged: Vec<WbsAggregateRow> = Vec::with_capacity(rows.len());
    for (mut row, parts) in rows.into_iter().zip(descriptions) {
        if row.item_code.trim().is_empty() || row.total_cost <= 0.0 {
            continue;
        }
        row.description = parts.join("; ");
        merged.push(row);
    }
    merged
}
