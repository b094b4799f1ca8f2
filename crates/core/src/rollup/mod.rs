//! WBS drill-down aggregation

pub mod service;

// The rollup reads through the same stores the analysis pipeline writes.
pub use crate::analysis::ports::{LineItemStore, ProjectStore};
pub use service::WbsRollupService;
