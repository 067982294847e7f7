//! Default values for sbom-merge configuration.

use super::types::{MergeConfig, OutputConfig};
use crate::merge::DEFAULT_AUTHORITATIVE_TOOL;

/// Default for pretty-printed JSON output.
pub const DEFAULT_PRETTY_OUTPUT: bool = true;

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            authoritative_tool: DEFAULT_AUTHORITATIVE_TOOL.to_string(),
            sort_output: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: None,
            pretty: DEFAULT_PRETTY_OUTPUT,
        }
    }
}
