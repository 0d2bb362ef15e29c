//! meridian-report
//!
//! Report synthesis: runs every registered instrument and the validity
//! calculator against one response set, contains per-instrument failures,
//! derives cross-instrument alerts and returns the assembled report.

pub mod alerts;
pub mod config;
pub mod enrich;
pub mod error;
pub mod orchestrator;

pub use orchestrator::Orchestrator;
