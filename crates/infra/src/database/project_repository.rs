//! SQLite-backed implementation of the `ProjectStore` port.
//!
//! All queries run on the shared `DbManager` pool inside blocking tasks,
//! keeping rusqlite off the async executor threads.

use std::sync::Arc;

use async_trait::async_trait;
use boqlens_core::analysis::ports::ProjectStore;
use boqlens_domain::{Project, ProjectStatus, Result};
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use crate::errors::map_join_error;

/// SQLite-backed project repository.
pub struct SqliteProjectRepository {
    db: Arc<DbManager>,
}

impl SqliteProjectRepository {
    /// Create a repository backed by the shared pool.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

const PROJECT_INSERT_SQL: &str = "INSERT INTO projects (id, name, file_path, status, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5)";

const PROJECT_SELECT_SQL: &str = "SELECT id, name, file_path, status, created_at
    FROM projects WHERE id = ?1";

const PROJECT_LIST_SQL: &str = "SELECT id, name, file_path, status, created_at
    FROM projects ORDER BY created_at DESC, id DESC";

const PROJECT_STATUS_SQL: &str = "UPDATE projects SET status = ?1 WHERE id = ?2";

const PROJECT_DELETE_SQL: &str = "DELETE FROM projects WHERE id = ?1";

#[async_trait]
impl ProjectStore for SqliteProjectRepository {
    async fn get_project(&self, id: &str) -> Result<Option<Project>> {
        let db = Arc::clone(&self.db);
        let id = id.to_owned();

        task::spawn_blocking(move || -> Result<Option<Project>> {
            let conn = db.get_connection()?;
            conn.query_row(PROJECT_SELECT_SQL, params![id], map_project_row)
                .optional()
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert_project(&self, project: &Project) -> Result<()> {
        let db = Arc::clone(&self.db);
        let project = project.clone();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                PROJECT_INSERT_SQL,
                params![
                    project.id,
                    project.name,
                    project.file_path,
                    project.status.as_str(),
                    project.created_at,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<Project>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(PROJECT_LIST_SQL).map_err(map_sql_error)?;
            let rows = stmt
                .query_map([], map_project_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<Project>>>()
                .map_err(map_sql_error)?;
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn set_status(&self, id: &str, status: ProjectStatus) -> Result<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_owned();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(PROJECT_STATUS_SQL, params![status.as_str(), id])
                .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_owned();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            // Line items and insights go with it via ON DELETE CASCADE.
            conn.execute(PROJECT_DELETE_SQL, params![id]).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_project_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    let status_text: String = row.get(3)?;
    let status = status_text.parse::<ProjectStatus>().map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(err))
    })?;

    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        file_path: row.get(2)?,
        status,
        created_at: row.get(4)?,
    })
}
