//! Package index and package merge.

use crate::model::{BomsByTool, ExternalRef, ExternalRefKey, SpdxPackage};
use indexmap::IndexMap;

/// A package together with the tool that reported it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageWithTool {
    pub tool: String,
    pub package: SpdxPackage,
}

/// Packages of all tools grouped by `"{name}-{version}"`, in first-seen order
pub type PackageIndex = IndexMap<String, Vec<PackageWithTool>>;

/// Result of merging the packages of all tools
#[derive(Debug, Clone, Default)]
pub struct PackageMergeResult {
    /// One package per surviving index key
    pub packages: Vec<SpdxPackage>,
    /// Groups dropped by the single-source container rule
    pub dropped_containers: usize,
    /// Merged packages dropped because their name was empty
    pub dropped_unnamed: usize,
}

/// Group every package of every tool by its index key.
#[must_use]
pub fn create_package_index(boms: &BomsByTool) -> PackageIndex {
    let mut index = PackageIndex::new();
    for (tool, doc) in boms {
        for package in &doc.packages {
            index
                .entry(package.index_key())
                .or_default()
                .push(PackageWithTool {
                    tool: tool.clone(),
                    package: package.clone(),
                });
        }
    }
    index
}

/// Attribution appended to an external reference comment
#[must_use]
pub fn attribution(tool: &str) -> String {
    format!("Found by {tool} Tool. ")
}

/// A group reported by a single tool whose package lists files.
///
/// Generators emit such a package for the scanned tree itself; it is not a
/// discovered dependency.
fn is_single_source_container(group: &[PackageWithTool]) -> bool {
    matches!(group, [only] if !only.package.has_files.is_empty())
}

/// Merge the external references of a group into one per (Type, Locator).
///
/// The comment of each merged reference names every tool that reported it,
/// once per tool.
#[must_use]
pub fn merged_external_refs(group: &[PackageWithTool]) -> Vec<ExternalRef> {
    let mut refs: IndexMap<ExternalRefKey, ExternalRef> = IndexMap::new();

    for entry in group {
        let note = attribution(&entry.tool);
        for ext_ref in &entry.package.external_refs {
            let key = ext_ref.key();
            let mut comment = refs
                .get(&key)
                .map(|existing| existing.comment.clone())
                .unwrap_or_default();
            if !comment.contains(note.trim_end()) {
                comment.push_str(&note);
            }

            let mut merged = ext_ref.clone();
            merged.comment = comment;
            refs.insert(key, merged);
        }
    }

    refs.into_values().collect()
}

/// Collapse the packages of all tools into one entry per name and version.
///
/// The first contributor of each group supplies the package fields; its
/// external references are replaced by the merged set of the whole group.
/// Single-source groups with files and packages without a name are dropped.
#[must_use]
pub fn merged_packages(boms: &BomsByTool) -> PackageMergeResult {
    let index = create_package_index(boms);
    let mut result = PackageMergeResult::default();

    for (key, group) in index {
        if is_single_source_container(&group) {
            tracing::debug!(
                key = %key,
                tool = %group[0].tool,
                "Dropping single-source package with files"
            );
            result.dropped_containers += 1;
            continue;
        }

        let external_refs = merged_external_refs(&group);
        let Some(first) = group.into_iter().next() else {
            continue;
        };

        let mut package = first.package;
        package.external_refs = external_refs;

        if package.name.is_empty() {
            tracing::debug!(key = %key, "Dropping package without a name");
            result.dropped_unnamed += 1;
            continue;
        }
        result.packages.push(package);
    }

    result
}
