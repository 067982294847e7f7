//! **Merge the SBOMs of several generators into one SPDX document.**
//!
//! Build pipelines often run more than one SBOM generator against the same
//! checkout: one tool finds licenses inside source files, another resolves
//! package manager dependencies, a third reads container metadata. Each
//! produces its own SPDX document. `sbom-merge` reconciles them into a
//! single de-duplicated, cross-referenced SPDX 2.2 document.
//!
//! ## Key Features
//!
//! - **File reconciliation**: one entry per normalized path, with a
//!   configurable authoritative tool whose records win.
//! - **Package de-duplication**: one package per name and version, with the
//!   external references of every tool combined and attributed.
//! - **Synthesized structure**: a root package summarizing file licenses
//!   and CONTAINS / DEPENDS_ON relationships.
//! - **Deterministic identifiers**: file IDs derive from path and SHA1;
//!   optional sorting makes the whole document reproducible.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the SPDX document structures, [`SpdxDocument`] and
//!   friends, plus [`BomsByTool`], the tool-keyed input of a merge.
//! - **[`parsers`]**: loaders for SPDX JSON and tag-value.
//! - **[`merge`]**: the merge stages and the [`Merger`] that runs them.
//! - **[`pipeline`]**: loading inputs and writing the merged document.
//! - **[`config`]**: YAML configuration with discovery and CLI layering.
//!
//! ## Getting Started
//!
//! ```no_run
//! use sbom_merge::merge::{MergeOptions, Merger};
//! use sbom_merge::pipeline::{load_boms, render_document, ToolInput};
//!
//! fn main() -> anyhow::Result<()> {
//!     let boms = load_boms(&[
//!         ToolInput::new("k8s-bom", "out/k8s-bom.spdx"),
//!         ToolInput::new("syft", "out/syft.spdx.json"),
//!     ])?;
//!
//!     let outcome = Merger::new(MergeOptions::new("/work/checkout")).merge(boms);
//!     println!(
//!         "{} files, {} packages",
//!         outcome.stats.merged_files, outcome.stats.merged_packages
//!     );
//!     println!("{}", render_document(&outcome.document, true)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `sbom-merge` library crate. The `sbom-merge`
//! binary wraps it: `sbom-merge merge --scan-dir . --input TOOL=PATH ...`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod utils;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, MergeConfig, OutputConfig, Validatable};
pub use error::{ErrorContext, Result, SbomMergeError};
pub use merge::{merge, MergeOptions, MergeOutcome, MergeStats, Merger};
pub use model::{BomsByTool, SpdxDocument, SpdxFile, SpdxPackage};
pub use parsers::{parse_document, parse_document_str, DocumentParser, SpdxParser};
