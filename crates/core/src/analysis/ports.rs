//! Port interfaces for project analysis
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use boqlens_domain::{Insight, LineItem, Project, ProjectStatus, Result};

use crate::ingest::RawRow;

/// Trait for persisting and querying projects
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Fetch a project by id, or `None` when it does not exist
    async fn get_project(&self, id: &str) -> Result<Option<Project>>;

    /// Insert a newly uploaded project
    async fn insert_project(&self, project: &Project) -> Result<()>;

    /// List all projects, most recently created first
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Update a project's lifecycle status
    async fn set_status(&self, id: &str, status: ProjectStatus) -> Result<()>;

    /// Delete a project, cascading to its line items and insights
    async fn delete_project(&self, id: &str) -> Result<()>;
}

/// Trait for storing and retrieving uploaded spreadsheet files
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store file bytes under a path relative to the store root
    async fn save(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Fetch the bytes previously stored at `path`
    async fn download(&self, path: &str) -> Result<Vec<u8>>;
}

/// Trait for decoding raw spreadsheet bytes into header-keyed rows
///
/// The analysis pipeline is agnostic to the on-disk format; whatever the
/// decoder yields is treated as already-tabular data.
pub trait SpreadsheetDecoder: Send + Sync {
    /// Decode `bytes` into one mapping per data row, keyed by column header
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RawRow>>;
}

/// Trait for persisting and querying line items
#[async_trait]
pub trait LineItemStore: Send + Sync {
    /// Remove every line item belonging to `project_id`
    async fn delete_all_for_project(&self, project_id: &str) -> Result<()>;

    /// Insert a batch of line items in the given order
    async fn insert_many(&self, items: &[LineItem]) -> Result<()>;

    /// All items for a project, ordered by total cost descending (stable)
    async fn list_for_project(&self, project_id: &str) -> Result<Vec<LineItem>>;

    /// Items at one WBS level, ordered by total cost descending (stable)
    async fn list_for_level(&self, project_id: &str, level: u32) -> Result<Vec<LineItem>>;
}

/// Trait for persisting generated insights
#[async_trait]
pub trait InsightStore: Send + Sync {
    /// Remove every insight belonging to `project_id`
    async fn delete_all_for_project(&self, project_id: &str) -> Result<()>;

    /// Insert a batch of insights
    async fn insert_many(&self, insights: &[Insight]) -> Result<()>;

    /// All insights for a project, in generation order
    async fn list_for_project(&self, project_id: &str) -> Result<Vec<Insight>>;
}
