//! Configuration types for sbom-merge.

use crate::merge::MergeOptions;
use crate::pipeline::ToolInput;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// File values form the base layer; CLI arguments are applied over them with
/// [`AppConfig::apply_overrides`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Merge behavior
    pub merge: MergeConfig,
    /// Output destination and formatting
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge options for a scan of `scan_dir` using this configuration
    #[must_use]
    pub fn merge_options(&self, scan_dir: &Path) -> MergeOptions {
        MergeOptions::new(scan_dir)
            .authoritative_tool(self.merge.authoritative_tool.clone())
            .sort_output(self.merge.sort_output)
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Merge-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MergeConfig {
    /// Tool whose file records take precedence over all others
    pub authoritative_tool: String,
    /// Sort creators, files, packages and external references in the output
    pub sort_output: bool,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Pretty-print the JSON document
    pub pretty: bool,
}

/// Values given on the command line.
///
/// `None` and `false` mean "not given" and leave the file setting in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub authoritative_tool: Option<String>,
    pub sort_output: bool,
    pub output_file: Option<PathBuf>,
    pub compact: bool,
}

// ============================================================================
// Command Configuration Types
// ============================================================================

/// Configuration for the `merge` command
#[derive(Debug, Clone)]
pub struct MergeCommandConfig {
    /// Directory the tools scanned
    pub scan_dir: PathBuf,
    /// Per-tool SBOM files; argument order is the merge tool order
    pub inputs: Vec<ToolInput>,
    /// Effective configuration (file values with CLI overrides applied)
    pub app: AppConfig,
    /// Suppress non-essential output
    pub quiet: bool,
}
