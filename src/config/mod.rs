//! Configuration module for sbom-merge.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sbom_merge::config::{load_or_default, AppConfig};
//!
//! let (mut config, loaded_from) = load_or_default(None);
//! config.apply_overrides(&cli_overrides);
//! let options = config.merge_options(&scan_dir);
//! ```
//!
//! # Configuration File
//!
//! Place a `.sbom-merge.yaml` file in your project root or `~/.config/sbom-merge/`:
//!
//! ```yaml
//! merge:
//!   authoritative_tool: k8s-bom
//!   sort_output: true
//! output:
//!   pretty: false
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::DEFAULT_PRETTY_OUTPUT;
pub use types::{AppConfig, CliOverrides, MergeCommandConfig, MergeConfig, OutputConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.sbom-merge.yaml` config files.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
