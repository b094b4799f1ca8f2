//! Heuristic insight rule engine
//!
//! A deliberately simple, rule-based layer on top of the ranked line-item
//! model: keyword tables and fixed percentage bounds, no learned models. It
//! is kept separate from the analysis pipeline so the numeric policy in
//! [`rules`] can change without touching ranking semantics.

pub mod engine;
pub mod rules;

pub use engine::InsightEngine;
