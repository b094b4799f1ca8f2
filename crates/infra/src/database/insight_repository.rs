//! SQLite-backed implementation of the `InsightStore` port.

use std::sync::Arc;

use async_trait::async_trait;
use boqlens_core::analysis::ports::InsightStore;
use boqlens_domain::{Insight, InsightKind, Result};
use rusqlite::{params, Row, ToSql};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use crate::errors::map_join_error;

/// SQLite-backed insight repository.
pub struct SqliteInsightRepository {
    db: Arc<DbManager>,
}

impl SqliteInsightRepository {
    /// Create a repository backed by the shared pool.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

const INSIGHT_INSERT_SQL: &str = "INSERT INTO insights (
        id, project_id, kind, item_code, title, detail, savings_min,
        savings_max, created_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

const INSIGHT_LIST_SQL: &str = "SELECT id, project_id, kind, item_code, title, detail,
        savings_min, savings_max, created_at
    FROM insights WHERE project_id = ?1 ORDER BY rowid";

const INSIGHT_DELETE_SQL: &str = "DELETE FROM insights WHERE project_id = ?1";

#[async_trait]
impl InsightStore for SqliteInsightRepository {
    async fn delete_all_for_project(&self, project_id: &str) -> Result<()> {
        let db = Arc::clone(&self.db);
        let project_id = project_id.to_owned();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(INSIGHT_DELETE_SQL, params![project_id]).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert_many(&self, insights: &[Insight]) -> Result<()> {
        let db = Arc::clone(&self.db);
        let insights = insights.to_vec();

        task::spawn_blocking(move || -> Result<()> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;
            {
                let mut stmt = tx.prepare(INSIGHT_INSERT_SQL).map_err(map_sql_error)?;
                for insight in &insights {
                    let kind = insight.kind.as_str();
                    let values: [&dyn ToSql; 9] = [
                        &insight.id,
                        &insight.project_id,
                        &kind,
                        &insight.item_code,
                        &insight.title,
                        &insight.detail,
                        &insight.savings_min,
                        &insight.savings_max,
                        &insight.created_at,
                    ];
                    stmt.execute(values.as_slice()).map_err(map_sql_error)?;
                }
            }
            tx.commit().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_for_project(&self, project_id: &str) -> Result<Vec<Insight>> {
        let db = Arc::clone(&self.db);
        let project_id = project_id.to_owned();

        task::spawn_blocking(move || -> Result<Vec<Insight>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(INSIGHT_LIST_SQL).map_err(map_sql_error)?;
            stmt.query_map(params![project_id], map_insight_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<Insight>>>()
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_insight_row(row: &Row<'_>) -> rusqlite::Result<Insight> {
    let kind_text: String = row.get(2)?;
    let kind = kind_text.parse::<InsightKind>().map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(err))
    })?;

    Ok(Insight {
        id: row.get(0)?,
        project_id: row.get(1)?,
        kind,
        item_code: row.get(3)?,
        title: row.get(4)?,
        detail: row.get(5)?,
        savings_min: row.get(6)?,
        savings_max: row.get(7)?,
        created_at: row.get(8)?,
    })
}
