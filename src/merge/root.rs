//! Synthetic root package.

use crate::model::{
    SpdxDocument, SpdxFile, SpdxPackage, DOWNLOAD_LOCATION_NONE, NOASSERTION, ROOT_PACKAGE_ID,
    ROOT_PACKAGE_NAME,
};
use indexmap::IndexSet;

/// Build the package standing for everything that was scanned.
///
/// It contains every file and carries the union of the licenses detected in
/// them, deduplicated in first-seen order (or alphabetically when
/// `sort_licenses` is set).
#[must_use]
pub fn root_package(files: &[SpdxFile], sort_licenses: bool) -> SpdxPackage {
    let licenses: IndexSet<&str> = files
        .iter()
        .flat_map(|file| file.license_info_in_file.iter().map(String::as_str))
        .collect();
    let mut license_info_from_files: Vec<String> =
        licenses.into_iter().map(ToString::to_string).collect();
    if sort_licenses {
        license_info_from_files.sort();
    }

    SpdxPackage {
        id: ROOT_PACKAGE_ID.to_string(),
        name: ROOT_PACKAGE_NAME.to_string(),
        download_location: DOWNLOAD_LOCATION_NONE.to_string(),
        license_concluded: NOASSERTION.to_string(),
        license_declared: NOASSERTION.to_string(),
        license_info_from_files,
        has_files: files.iter().map(|file| file.id.clone()).collect(),
        ..SpdxPackage::default()
    }
}

/// Prepend the root package to the document's packages.
pub fn add_root_package(doc: &mut SpdxDocument, sort_licenses: bool) {
    let root = root_package(&doc.files, sort_licenses);
    doc.packages.insert(0, root);
}
