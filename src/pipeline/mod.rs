//! Pipeline orchestration around the merge.
//!
//! This module provides the load → merge → write steps shared by the CLI
//! handlers: reading each tool's SBOM, resolving the scanned directory and
//! rendering the merged document to its destination.

mod output;
mod parse;

pub use output::{render_document, write_output, OutputTarget};
pub use parse::{load_boms, load_tool_input, resolve_scan_dir, ToolInput};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A `TOOL=PATH` argument could not be understood
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// The same tool was given more than once
    #[error("Duplicate tool '{tool}': {first} and {second}")]
    DuplicateTool {
        tool: String,
        first: String,
        second: String,
    },

    /// Failed to read or parse an SBOM file
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: crate::error::SbomMergeError,
    },

    /// Rendering or writing the merged document failed
    #[error("Output failed: {source}")]
    OutputFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// The merged document was written
    pub const SUCCESS: i32 = 0;
    /// An error occurred
    pub const ERROR: i32 = 1;
}
