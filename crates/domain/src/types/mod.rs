//! Domain types and models

pub mod analysis;
pub mod boq;
pub mod insight;

// Re-export the model types for convenience
pub use analysis::{AnalysisReport, WbsAggregateRow, WbsBreakdown};
pub use boq::{LineItem, Project, ProjectStatus};
pub use insight::{Insight, InsightKind};
