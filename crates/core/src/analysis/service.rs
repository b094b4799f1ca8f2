//! Analysis service - core business logic
//!
//! Owns the upload-to-ranked-items pipeline: fetch the stored spreadsheet,
//! decode it, normalize rows, derive the WBS hierarchy, rank by cost, and
//! replace the project's persisted items. Re-processing a project is
//! idempotent; results always reflect only the latest upload.
//!
//! Overlapping `process_project` calls for the same project are a caller
//! error: the delete-then-insert replacement is not serialized internally.
//! Calls for different projects are independent.

use std::sync::Arc;

use boqlens_domain::{
    AnalysisReport, BoqLensError, Insight, LineItem, Project, ProjectStatus, Result,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::ports::{FileStore, InsightStore, LineItemStore, ProjectStore, SpreadsheetDecoder};
use crate::ingest::{parse_row, ParsedRow};
use crate::insights::InsightEngine;
use crate::{pareto, wbs};

/// Spreadsheet analysis service
pub struct AnalysisService {
    projects: Arc<dyn ProjectStore>,
    files: Arc<dyn FileStore>,
    decoder: Arc<dyn SpreadsheetDecoder>,
    line_items: Arc<dyn LineItemStore>,
    insight_store: Arc<dyn InsightStore>,
    insight_engine: InsightEngine,
}

impl AnalysisService {
    /// Create a new analysis service
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        files: Arc<dyn FileStore>,
        decoder: Arc<dyn SpreadsheetDecoder>,
        line_items: Arc<dyn LineItemStore>,
        insight_store: Arc<dyn InsightStore>,
    ) -> Self {
        Self {
            projects,
            files,
            decoder,
            line_items,
            insight_store,
            insight_engine: InsightEngine::new(),
        }
    }

    /// Register an uploaded spreadsheet as a new project.
    ///
    /// Stores the file under `<project-id>/<file-name>` and inserts the
    /// project with status `uploaded`.
    pub async fn register_upload(
        &self,
        name: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoqLensError::InvalidInput("project name must not be empty".into()));
        }

        let id = Uuid::now_v7().to_string();
        let project = Project {
            file_path: format!("{id}/{file_name}"),
            id,
            name: name.to_string(),
            status: ProjectStatus::Uploaded,
            created_at: Utc::now().timestamp(),
        };

        self.files.save(&project.file_path, bytes).await?;
        self.projects.insert_project(&project).await?;

        info!(project_id = %project.id, file = %project.file_path, "project registered");
        Ok(project)
    }

    /// Analyse a project's spreadsheet and replace its stored line items.
    ///
    /// Fails with `NotFound` for an unknown project and `InvalidInput` when
    /// the spreadsheet decodes to zero rows or zero usable line items. All
    /// precondition failures happen before any mutation.
    pub async fn process_project(&self, project_id: &str) -> Result<AnalysisReport> {
        let project = self.require_project(project_id).await?;

        let bytes = self.files.download(&project.file_path).await?;
        let rows = self.decoder.decode(&bytes)?;
        if rows.is_empty() {
            return Err(BoqLensError::InvalidInput(
                "spreadsheet contains no data rows".into(),
            ));
        }

        let mut parsed: Vec<ParsedRow> = Vec::with_capacity(rows.len());
        let mut rejected_rows = 0usize;
        for row in &rows {
            match parse_row(row) {
                Some(item) => parsed.push(item),
                None => rejected_rows += 1,
            }
        }
        if parsed.is_empty() {
            return Err(BoqLensError::InvalidInput(
                "no valid line items found in spreadsheet".into(),
            ));
        }
        if rejected_rows > 0 {
            warn!(project_id = %project.id, rejected_rows, "dropped unusable spreadsheet rows");
        }

        let mut items: Vec<LineItem> = parsed
            .into_iter()
            .map(|row| Self::to_line_item(&project.id, row))
            .collect();
        pareto::rank(&mut items);

        // Reporting total: level-1 items only, so parent rows that roll up
        // their children are not double-counted.
        let total_project_cost: f64 = items
            .iter()
            .filter(|item| item.wbs_level == 1)
            .map(|item| item.total_cost)
            .sum();
        let pareto_critical_items = items.iter().filter(|item| item.is_critical()).count();

        // Replacement semantics: old rows are gone before new rows commit.
        self.line_items.delete_all_for_project(&project.id).await?;
        self.line_items.insert_many(&items).await?;

        let insights = self.insight_engine.generate(&project.id, &items);
        self.insight_store.delete_all_for_project(&project.id).await?;
        self.insight_store.insert_many(&insights).await?;

        self.projects.set_status(&project.id, ProjectStatus::Processed).await?;

        info!(
            project_id = %project.id,
            total_items = items.len(),
            pareto_critical_items,
            rejected_rows,
            "project analysis complete"
        );

        Ok(AnalysisReport {
            project_id: project.id,
            total_items: items.len(),
            total_project_cost,
            pareto_critical_items,
            rejected_rows,
            items,
        })
    }

    /// List all projects, most recent first
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.projects.list_projects().await
    }

    /// Fetch the stored insights for a project
    pub async fn project_insights(&self, project_id: &str) -> Result<Vec<Insight>> {
        self.require_project(project_id).await?;
        self.insight_store.list_for_project(project_id).await
    }

    /// Delete a project and everything derived from it
    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        self.require_project(project_id).await?;
        self.projects.delete_project(project_id).await?;
        info!(project_id, "project deleted");
        Ok(())
    }

    async fn require_project(&self, project_id: &str) -> Result<Project> {
        self.projects.get_project(project_id).await?.ok_or_else(|| {
            BoqLensError::NotFound(format!("project {project_id} does not exist"))
        })
    }

    fn to_line_item(project_id: &str, row: ParsedRow) -> LineItem {
        LineItem {
            id: Uuid::now_v7().to_string(),
            project_id: project_id.to_string(),
            wbs_level: wbs::level(&row.item_code),
            parent_item_code: wbs::parent_code(&row.item_code),
            item_code: row.item_code,
            description: row.description,
            quantity: row.quantity,
            unit: row.unit,
            unit_rate: row.unit_rate,
            total_cost: row.total_cost,
            cumulative_cost: None,
            cumulative_percentage: None,
            is_pareto_critical: None,
        }
    }
}
