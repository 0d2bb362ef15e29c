//! meridian-core
//!
//! Pure domain types for the Meridian scoring pipeline. No scoring logic
//! lives here; these are the types shared by the scorers, the validity
//! calculator, the orchestrator and downstream renderers.

pub mod error;
pub mod models;
