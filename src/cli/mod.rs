//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.

mod merge;

pub use merge::run_merge;

// Re-export config types used by handlers
pub use crate::config::MergeCommandConfig;
