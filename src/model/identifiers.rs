//! Fixed SPDX identifiers and identifier synthesis.
//!
//! The merged document is consumed by writers that already agree on a handful
//! of element IDs. Those are process-wide contract strings, not configuration.

/// SPDX ID of the document itself
pub const DOCUMENT_ID: &str = "SPDXRef-DOCUMENT";

/// SPDX ID of the package representing the scan as a whole.
///
/// This element is not synthesized by the merge; it is the anchor of every
/// CONTAINS and DEPENDS_ON edge and the only entry in `documentDescribes`.
pub const SCAN_PACKAGE_ID: &str = "SPDXRef-Package-scan";

/// SPDX ID of the synthetic root package
pub const ROOT_PACKAGE_ID: &str = "SPDXRef-Package-RootPackage";

/// Name of the synthetic root package
pub const ROOT_PACKAGE_NAME: &str = "RootPackage";

/// SPDX specification version stamped on merged documents
pub const SPDX_VERSION: &str = "SPDX-2.2";

/// Data license required by SPDX for the document metadata
pub const DATA_LICENSE: &str = "CC0-1.0";

/// SPDX sentinel for "no assertion possible"
pub const NOASSERTION: &str = "NOASSERTION";

/// Download location used for packages that cannot be downloaded
pub const DOWNLOAD_LOCATION_NONE: &str = "NONE";

/// Prefix of the merged document name; the scanned directory follows it
pub const DOCUMENT_NAME_PREFIX: &str = "SPDX-SBOM-";

/// Build the SPDX ID of a merged file entry.
///
/// The ID is derived from the normalized file name and its SHA1 checksum, so
/// the same file reported by several tools maps to the same ID and repeated
/// merges of the same inputs produce the same IDs. A missing checksum leaves
/// an empty suffix.
#[must_use]
pub fn file_id(name: &str, sha1: &str) -> String {
    format!("SPDXRef-File-{name}-{sha1}")
}

/// Build the merged document name for a scanned directory.
#[must_use]
pub fn document_name(scan_dir: &str) -> String {
    format!("{DOCUMENT_NAME_PREFIX}{scan_dir}")
}
