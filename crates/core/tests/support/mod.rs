//! In-memory port implementations shared by the core service tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use boqlens_core::analysis::ports::{
    FileStore, InsightStore, LineItemStore, ProjectStore, SpreadsheetDecoder,
};
use boqlens_core::{AnalysisService, RawRow, WbsRollupService};
use boqlens_domain::{
    BoqLensError, Insight, LineItem, Project, ProjectStatus, Result,
};

#[derive(Default)]
pub struct InMemoryProjectStore {
    projects: Mutex<HashMap<String, Project>>,
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn get_project(&self, id: &str) -> Result<Option<Project>> {
        Ok(self.projects.lock().unwrap().get(id).cloned())
    }

    async fn insert_project(&self, project: &Project) -> Result<()> {
        self.projects.lock().unwrap().insert(project.id.clone(), project.clone());
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> =
            self.projects.lock().unwrap().values().cloned().collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn set_status(&self, id: &str, status: ProjectStatus) -> Result<()> {
        let mut projects = self.projects.lock().unwrap();
        let project = projects
            .get_mut(id)
            .ok_or_else(|| BoqLensError::NotFound(format!("project {id} does not exist")))?;
        project.status = status;
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        self.projects.lock().unwrap().remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryFileStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn save(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.files.lock().unwrap().insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| BoqLensError::Storage(format!("no file stored at {path}")))
    }
}

#[derive(Default)]
pub struct InMemoryLineItemStore {
    items: Mutex<Vec<LineItem>>,
}

impl InMemoryLineItemStore {
    pub fn all(&self) -> Vec<LineItem> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait]
impl LineItemStore for InMemoryLineItemStore {
    async fn delete_all_for_project(&self, project_id: &str) -> Result<()> {
        self.items.lock().unwrap().retain(|item| item.project_id != project_id);
        Ok(())
    }

    async fn insert_many(&self, items: &[LineItem]) -> Result<()> {
        self.items.lock().unwrap().extend_from_slice(items);
        Ok(())
    }

    async fn list_for_project(&self, project_id: &str) -> Result<Vec<LineItem>> {
        let mut items: Vec<LineItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.project_id == project_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.total_cost.partial_cmp(&a.total_cost).unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(items)
    }

    async fn list_for_level(&self, project_id: &str, level: u32) -> Result<Vec<LineItem>> {
        Ok(self
            .list_for_project(project_id)
            .await?
            .into_iter()
            .filter(|item| item.wbs_level == level)
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryInsightStore {
    insights: Mutex<Vec<Insight>>,
}

impl InMemoryInsightStore {
    pub fn all(&self) -> Vec<Insight> {
        self.insights.lock().unwrap().clone()
    }
}

#[async_trait]
impl InsightStore for InMemoryInsightStore {
    async fn delete_all_for_project(&self, project_id: &str) -> Result<()> {
        self.insights.lock().unwrap().retain(|insight| insight.project_id != project_id);
        Ok(())
    }

    async fn insert_many(&self, insights: &[Insight]) -> Result<()> {
        self.insights.lock().unwrap().extend_from_slice(insights);
        Ok(())
    }

    async fn list_for_project(&self, project_id: &str) -> Result<Vec<Insight>> {
        Ok(self
            .insights
            .lock()
            .unwrap()
            .iter()
            .filter(|insight| insight.project_id == project_id)
            .cloned()
            .collect())
    }
}

/// Decoder for tests: the stored "spreadsheet" is a JSON array of rows.
pub struct JsonRowsDecoder;

impl SpreadsheetDecoder for JsonRowsDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RawRow>> {
        serde_json::from_slice(bytes)
            .map_err(|err| BoqLensError::Decode(format!("invalid row payload: {err}")))
    }
}

/// Everything a service test needs, wired over the in-memory ports.
pub struct Harness {
    pub projects: Arc<InMemoryProjectStore>,
    pub files: Arc<InMemoryFileStore>,
    pub line_items: Arc<InMemoryLineItemStore>,
    pub insights: Arc<InMemoryInsightStore>,
    pub analysis: AnalysisService,
    pub rollup: WbsRollupService,
}

impl Harness {
    pub fn new() -> Self {
        let projects = Arc::new(InMemoryProjectStore::default());
        let files = Arc::new(InMemoryFileStore::default());
        let line_items = Arc::new(InMemoryLineItemStore::default());
        let insights = Arc::new(InMemoryInsightStore::default());

        let analysis = AnalysisService::new(
            Arc::clone(&projects) as Arc<dyn ProjectStore>,
            Arc::clone(&files) as Arc<dyn FileStore>,
            Arc::new(JsonRowsDecoder),
            Arc::clone(&line_items) as Arc<dyn LineItemStore>,
            Arc::clone(&insights) as Arc<dyn InsightStore>,
        );
        let rollup = WbsRollupService::new(
            Arc::clone(&projects) as Arc<dyn ProjectStore>,
            Arc::clone(&line_items) as Arc<dyn LineItemStore>,
        );

        Self { projects, files, line_items, insights, analysis, rollup }
    }

    /// Register a project whose stored file is the JSON-encoded `rows`.
    pub async fn seed_project(&self, name: &str, rows: &serde_json::Value) -> Project {
        let bytes = serde_json::to_vec(rows).expect("rows should serialize");
        self.analysis
            .register_upload(name, "boq.json", &bytes)
            .await
            .expect("upload should register")
    }

    /// Overwrite a project's stored file with new JSON rows.
    pub async fn replace_file(&self, project: &Project, rows: &serde_json::Value) {
        let bytes = serde_json::to_vec(rows).expect("rows should serialize");
        self.files
            .save(&project.file_path, &bytes)
            .await
            .expect("file should store");
    }
}
