//! Creation metadata merge.

use crate::model::{BomsByTool, CreationInfo};
use crate::utils::compare_versions;
use chrono::{DateTime, SecondsFormat, Utc};
use std::cmp::Ordering;

/// Merge the creation metadata of all tools, stamped with the current time.
#[must_use]
pub fn merged_creation_info(boms: &BomsByTool) -> CreationInfo {
    merged_creation_info_at(boms, Utc::now())
}

/// Merge the creation metadata of all tools with an explicit timestamp.
///
/// Creators are concatenated in tool order. The license list version is the
/// highest one reported; on ties the first-seen value is kept.
#[must_use]
pub fn merged_creation_info_at(boms: &BomsByTool, created: DateTime<Utc>) -> CreationInfo {
    let mut info = CreationInfo::default();

    for doc in boms.values() {
        info.creators
            .extend(doc.creation_info.creators.iter().cloned());

        let candidate = &doc.creation_info.license_list_version;
        if compare_versions(&info.license_list_version, candidate) == Ordering::Less {
            info.license_list_version.clone_from(candidate);
        }
    }

    info.created = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    info
}
