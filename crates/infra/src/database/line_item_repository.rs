//! SQLite-backed implementation of the `LineItemStore` port.
//!
//! Listing orders by total cost descending with `rowid` as the tie-break.
//! Items are inserted in ranked order, so the tie-break reproduces the stable
//! ranking order across the round-trip.

use std::sync::Arc;

use async_trait::async_trait;
use boqlens_core::analysis::ports::LineItemStore;
use boqlens_domain::{LineItem, Result};
use rusqlite::{params, Row, ToSql};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use crate::errors::map_join_error;

/// SQLite-backed line item repository.
pub struct SqliteLineItemRepository {
    db: Arc<DbManager>,
}

impl SqliteLineItemRepository {
    /// Create a repository backed by the shared pool.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

const ITEM_INSERT_SQL: &str = "INSERT INTO line_items (
        id, project_id, item_code, description, quantity, unit, unit_rate,
        total_cost, wbs_level, parent_item_code, cumulative_cost,
        cumulative_percentage, is_pareto_critical
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";

const ITEM_SELECT_COLUMNS: &str = "id, project_id, item_code, description, quantity, unit,
        unit_rate, total_cost, wbs_level, parent_item_code, cumulative_cost,
        cumulative_percentage, is_pareto_critical";

const ITEM_DELETE_SQL: &str = "DELETE FROM line_items WHERE project_id = ?1";

#[async_trait]
impl LineItemStore for SqliteLineItemRepository {
    async fn delete_all_for_project(&self, project_id: &str) -> Result<()> {
        let db = Arc::clone(&self.db);
        let project_id = project_id.to_owned();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(ITEM_DELETE_SQL, params![project_id]).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert_many(&self, items: &[LineItem]) -> Result<()> {
        let db = Arc::clone(&self.db);
        let items = items.to_vec();

        task::spawn_blocking(move || -> Result<()> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;
            {
                let mut stmt = tx.prepare(ITEM_INSERT_SQL).map_err(map_sql_error)?;
                for item in &items {
                    let values: [&dyn ToSql; 13] = [
                        &item.id,
                        &item.project_id,
                        &item.item_code,
                        &item.description,
                        &item.quantity,
                        &item.unit,
                        &item.unit_rate,
                        &item.total_cost,
                        &item.wbs_level,
                        &item.parent_item_code,
                        &item.cumulative_cost,
                        &item.cumulative_percentage,
                        &item.is_pareto_critical,
                    ];
                    stmt.execute(values.as_slice()).map_err(map_sql_error)?;
                }
            }
            tx.commit().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_for_project(&self, project_id: &str) -> Result<Vec<LineItem>> {
        let db = Arc::clone(&self.db);
        let project_id = project_id.to_owned();
        let sql = format!(
            "SELECT {ITEM_SELECT_COLUMNS} FROM line_items
             WHERE project_id = ?1 ORDER BY total_cost DESC, rowid"
        );

        task::spawn_blocking(move || -> Result<Vec<LineItem>> {
            let conn = db.get_connection()?;
            query_items(&conn, &sql, params![project_id])
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_for_level(&self, project_id: &str, level: u32) -> Result<Vec<LineItem>> {
        let db = Arc::clone(&self.db);
        let project_id = project_id.to_owned();
        let sql = format!(
            "SELECT {ITEM_SELECT_COLUMNS} FROM line_items
             WHERE project_id = ?1 AND wbs_level = ?2 ORDER BY total_cost DESC, rowid"
        );

        task::spawn_blocking(move || -> Result<Vec<LineItem>> {
            let conn = db.get_connection()?;
            query_items(&conn, &sql, params![project_id, level])
        })
        .await
        .map_err(map_join_error)?
    }
}

fn query_items(
    conn: &rusqlite::Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<LineItem>> {
    let mut stmt = conn.prepare(sql).map_err(map_sql_error)?;
    stmt.query_map(params, map_item_row)
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<LineItem>>>()
        .map_err(map_sql_error)
}

fn map_item_row(row: &Row<'_>) -> rusqlite::Result<LineItem> {
    Ok(LineItem {
        id: row.get(0)?,
        project_id: row.get(1)?,
        item_code: row.get(2)?,
        description: row.get(3)?,
        quantity: row.get(4)?,
        unit: row.get(5)?,
        unit_rate: row.get(6)?,
        total_cost: row.get(7)?,
        wbs_level: row.get(8)?,
        parent_item_code: row.get(9)?,
        cumulative_cost: row.get(10)?,
        cumulative_percentage: row.get(11)?,
        is_pareto_critical: row.get(12)?,
    })
}
