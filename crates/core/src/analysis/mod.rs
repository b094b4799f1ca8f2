//! Project analysis
//!
//! Turns an uploaded spreadsheet into ranked, persisted line items.

pub mod ports;
pub mod service;

pub use service::AnalysisService;
