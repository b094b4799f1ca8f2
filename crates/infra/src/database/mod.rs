//! SQLite persistence adapters

pub mod insight_repository;
pub mod line_item_repository;
pub mod manager;
pub mod project_repository;

pub use insight_repository::SqliteInsightRepository;
pub use line_item_repository::SqliteLineItemRepository;
pub use manager::{DbConnection, DbManager};
pub use project_repository::SqliteProjectRepository;
