//! Merge of per-tool SPDX documents into one consolidated document.
//!
//! The merge runs as a fixed sequence of stages over the tool mapping:
//!
//! 1. [`merged_creation_info`]: creators, license list version, timestamp
//! 2. [`merged_packages`]: one package per name and version, external
//!    references combined with per-tool attribution
//! 3. [`merged_files`]: one file per normalized path, the authoritative tool
//!    taking precedence, IDs derived from path and SHA1
//! 4. [`create_relationships`]: CONTAINS edges for files, DEPENDS_ON edges for
//!    packages, all anchored at [`SCAN_PACKAGE_ID`]
//! 5. [`add_root_package`]: synthetic root package prepended to the packages
//!
//! Relationships are built before the root package is added, so the root
//! package has no DEPENDS_ON edge.
//!
//! The merge is synchronous and infallible: degenerate inputs produce a
//! sparse document rather than an error.
//!
//! ```
//! use sbom_merge::merge::{merge, MergeOptions};
//! use sbom_merge::model::{BomsByTool, SpdxDocument, SpdxFile};
//!
//! let mut boms = BomsByTool::new();
//! let mut doc = SpdxDocument::default();
//! doc.files.push(SpdxFile::new("./src/main.rs").with_checksum("SHA1", "abc"));
//! boms.insert("syft".to_string(), doc);
//!
//! let merged = merge(boms, &MergeOptions::new("/work/repo"));
//! assert_eq!(merged.files[0].id, "SPDXRef-File-src/main.rs-abc");
//! assert_eq!(merged.packages[0].name, "RootPackage");
//! ```

mod files;
mod metadata;
mod packages;
mod relationships;
mod root;

pub use files::{clean_path, merged_files, normalize_file_paths};
pub use metadata::{merged_creation_info, merged_creation_info_at};
pub use packages::{
    attribution, create_package_index, merged_external_refs, merged_packages, PackageIndex,
    PackageMergeResult, PackageWithTool,
};
pub use relationships::create_relationships;
pub use root::{add_root_package, root_package};

use crate::model::{
    document_name, BomsByTool, ExternalRef, SpdxDocument, DATA_LICENSE, DOCUMENT_ID, SCAN_PACKAGE_ID,
    SPDX_VERSION,
};
use crate::utils::document_hash;
use std::path::PathBuf;

/// Tool whose file records take precedence: it detects licenses inside files.
pub const DEFAULT_AUTHORITATIVE_TOOL: &str = "k8s-bom";

/// Options controlling a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Absolute path of the scanned directory, embedded in the document name
    pub scan_dir: PathBuf,
    /// Tool whose file records win over every other tool's
    pub authoritative_tool: String,
    /// Sort files, packages and references by stable keys
    pub sort_output: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            scan_dir: PathBuf::new(),
            authoritative_tool: DEFAULT_AUTHORITATIVE_TOOL.to_string(),
            sort_output: false,
        }
    }
}

impl MergeOptions {
    /// Options for a scanned directory with default settings
    pub fn new(scan_dir: impl Into<PathBuf>) -> Self {
        Self {
            scan_dir: scan_dir.into(),
            ..Self::default()
        }
    }

    /// Set the authoritative tool
    #[must_use]
    pub fn authoritative_tool(mut self, tool: impl Into<String>) -> Self {
        self.authoritative_tool = tool.into();
        self
    }

    /// Enable or disable output sorting
    #[must_use]
    pub fn sort_output(mut self, sort: bool) -> Self {
        self.sort_output = sort;
        self
    }
}

/// Counters describing a merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub tools: usize,
    pub input_files: usize,
    pub merged_files: usize,
    pub input_packages: usize,
    /// Merged packages, not counting the root package
    pub merged_packages: usize,
    pub dropped_container_packages: usize,
    pub dropped_unnamed_packages: usize,
    pub relationships: usize,
    /// Hash of the merged document without its timestamp
    pub content_hash: u64,
}

/// A merged document together with its statistics
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub document: SpdxDocument,
    pub stats: MergeStats,
}

/// Runs the merge stages in order
#[derive(Debug, Clone, Default)]
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    #[must_use]
    pub const fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge the documents of all tools.
    ///
    /// File names in `boms` are normalized before files are merged; the
    /// mapping is consumed.
    #[must_use]
    pub fn merge(&self, mut boms: BomsByTool) -> MergeOutcome {
        let mut stats = MergeStats {
            tools: boms.len(),
            input_files: boms.values().map(|doc| doc.files.len()).sum(),
            input_packages: boms.values().map(|doc| doc.packages.len()).sum(),
            ..MergeStats::default()
        };

        let mut doc = SpdxDocument {
            creation_info: merged_creation_info(&boms),
            ..SpdxDocument::default()
        };
        tracing::debug!(
            creators = doc.creation_info.creators.len(),
            license_list_version = %doc.creation_info.license_list_version,
            "Merged creation info"
        );

        let package_merge = merged_packages(&boms);
        stats.dropped_container_packages = package_merge.dropped_containers;
        stats.dropped_unnamed_packages = package_merge.dropped_unnamed;
        doc.packages = package_merge.packages;
        tracing::debug!(packages = doc.packages.len(), "Merged packages");

        doc.files = merged_files(&mut boms, &self.options.authoritative_tool);
        tracing::debug!(files = doc.files.len(), "Merged files");

        if self.options.sort_output {
            sort_document(&mut doc);
        }

        create_relationships(&mut doc);
        add_root_package(&mut doc, self.options.sort_output);
        self.stamp_identity(&mut doc);

        stats.merged_files = doc.files.len();
        stats.merged_packages = doc.packages.len().saturating_sub(1);
        stats.relationships = doc.relationships.len();
        stats.content_hash = document_hash(&doc);

        tracing::info!(
            tools = stats.tools,
            files = stats.merged_files,
            packages = stats.merged_packages,
            relationships = stats.relationships,
            "Merged {} SBOMs: {} files, {} packages",
            stats.tools,
            stats.merged_files,
            stats.merged_packages
        );

        MergeOutcome {
            document: doc,
            stats,
        }
    }

    fn stamp_identity(&self, doc: &mut SpdxDocument) {
        doc.id = DOCUMENT_ID.to_string();
        doc.name = document_name(&self.options.scan_dir.to_string_lossy());
        doc.version = SPDX_VERSION.to_string();
        doc.data_license = DATA_LICENSE.to_string();
        doc.document_describes = vec![SCAN_PACKAGE_ID.to_string()];
    }
}

/// Sort creators, files by name, packages by name and version, and each
/// package's external references by type and locator.
///
/// Attribution comments keep tool order.
fn sort_document(doc: &mut SpdxDocument) {
    doc.creation_info.creators.sort();
    doc.files.sort_by(|a, b| a.name.cmp(&b.name));
    doc.packages
        .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.version.cmp(&b.version)));
    for package in &mut doc.packages {
        package.external_refs.sort_by_key(ExternalRef::key);
    }
}

/// Merge the documents of all tools with the given options.
#[must_use]
pub fn merge(boms: BomsByTool, options: &MergeOptions) -> SpdxDocument {
    Merger::new(options.clone()).merge(boms).document
}
