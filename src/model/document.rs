//! SPDX document, file, package and relationship structures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SPDX documents keyed by the name of the tool that generated them.
///
/// Insertion order is the tool order used throughout the merge, which keeps
/// creator lists, file precedence among non-authoritative tools and output
/// order reproducible.
pub type BomsByTool = IndexMap<String, SpdxDocument>;

/// An SPDX document, either as produced by one tool or as the merged result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpdxDocument {
    /// Document SPDX ID (`SPDXRef-DOCUMENT` for merged output)
    #[serde(rename = "SPDXID")]
    pub id: String,
    /// Document name
    pub name: String,
    /// SPDX specification version, e.g. `SPDX-2.2`
    #[serde(rename = "spdxVersion")]
    pub version: String,
    /// License of the document metadata itself
    pub data_license: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_namespace: Option<String>,
    /// Creation metadata
    pub creation_info: CreationInfo,
    /// IDs of the elements this document describes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub document_describes: Vec<String>,
    pub files: Vec<SpdxFile>,
    pub packages: Vec<SpdxPackage>,
    pub relationships: Vec<Relationship>,
}

impl SpdxDocument {
    /// Find a file entry by its (normalized) name
    #[must_use]
    pub fn find_file(&self, name: &str) -> Option<&SpdxFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Find a package entry by name and version
    #[must_use]
    pub fn find_package(&self, name: &str, version: &str) -> Option<&SpdxPackage> {
        self.packages
            .iter()
            .find(|p| p.name == name && p.version == version)
    }

    /// IDs of all file entries, in document order
    #[must_use]
    pub fn file_ids(&self) -> Vec<String> {
        self.files.iter().map(|f| f.id.clone()).collect()
    }
}

/// Document creation metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreationInfo {
    /// RFC3339 creation timestamp
    pub created: String,
    /// Tool, organization and person attributions (`Tool: syft-0.80.0`)
    pub creators: Vec<String>,
    /// Version of the SPDX license list used by the generator
    #[serde(skip_serializing_if = "String::is_empty")]
    pub license_list_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A file entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpdxFile {
    #[serde(rename = "SPDXID")]
    pub id: String,
    /// Path of the file relative to the scanned directory
    #[serde(rename = "fileName")]
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checksums: Vec<Checksum>,
    /// Licenses detected in the file's content
    #[serde(rename = "licenseInfoInFiles", skip_serializing_if = "Vec::is_empty")]
    pub license_info_in_file: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_concluded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
}

impl SpdxFile {
    /// Create a file entry with just a name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a checksum (builder style)
    #[must_use]
    pub fn with_checksum(mut self, algorithm: impl Into<String>, value: impl Into<String>) -> Self {
        self.checksums.push(Checksum::new(algorithm, value));
        self
    }

    /// Add a detected license (builder style)
    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license_info_in_file.push(license.into());
        self
    }

    /// Value of the first SHA1 checksum, if any
    #[must_use]
    pub fn sha1(&self) -> Option<&str> {
        self.checksums
            .iter()
            .find(|c| c.is_sha1())
            .map(|c| c.value.as_str())
    }
}

/// A content checksum
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Checksum {
    /// Algorithm name as written by the generator (`SHA1`, `SHA256`, ...)
    pub algorithm: String,
    #[serde(rename = "checksumValue")]
    pub value: String,
}

impl Checksum {
    #[must_use]
    pub fn new(algorithm: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            value: value.into(),
        }
    }

    /// Whether this is a SHA1 checksum (algorithm name matched case-insensitively)
    #[must_use]
    pub fn is_sha1(&self) -> bool {
        self.algorithm.eq_ignore_ascii_case("SHA1")
    }
}

/// A package entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpdxPackage {
    #[serde(rename = "SPDXID")]
    pub id: String,
    pub name: String,
    #[serde(rename = "versionInfo", skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub download_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_analyzed: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub license_concluded: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub license_declared: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub license_info_from_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub originator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checksums: Vec<Checksum>,
    /// IDs of the files contained in this package
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub has_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_refs: Vec<ExternalRef>,
}

impl SpdxPackage {
    /// Create a package with a name and version
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Set the SPDX ID (builder style)
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Add an external reference (builder style)
    #[must_use]
    pub fn with_external_ref(mut self, ext_ref: ExternalRef) -> Self {
        self.external_refs.push(ext_ref);
        self
    }

    /// Add a contained file ID (builder style)
    #[must_use]
    pub fn with_file(mut self, file_id: impl Into<String>) -> Self {
        self.has_files.push(file_id.into());
        self
    }

    /// Key used to group the same package reported by different tools.
    // TODO: key by purl once every supported generator emits purls
    #[must_use]
    pub fn index_key(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// A typed reference from a package to an external identifier system
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalRef {
    /// `PACKAGE-MANAGER`, `SECURITY`, ...
    pub reference_category: String,
    /// `purl`, `cpe23Type`, ...
    #[serde(rename = "referenceType")]
    pub ref_type: String,
    #[serde(rename = "referenceLocator")]
    pub locator: String,
    /// Free-text attribution of the tools that reported this reference
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl ExternalRef {
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        ref_type: impl Into<String>,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            reference_category: category.into(),
            ref_type: ref_type.into(),
            locator: locator.into(),
            comment: String::new(),
        }
    }

    /// Package URL reference
    #[must_use]
    pub fn purl(locator: impl Into<String>) -> Self {
        Self::new("PACKAGE-MANAGER", "purl", locator)
    }

    /// Identity of the reference, ignoring the comment
    #[must_use]
    pub fn key(&self) -> ExternalRefKey {
        ExternalRefKey {
            ref_type: self.ref_type.clone(),
            locator: self.locator.clone(),
        }
    }
}

/// Identity of an external reference: (Type, Locator)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalRefKey {
    pub ref_type: String,
    pub locator: String,
}

/// A directed edge between two document elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(rename = "spdxElementId")]
    pub element: String,
    pub relationship_type: RelationshipType,
    #[serde(rename = "relatedSpdxElement")]
    pub related: String,
}

impl Relationship {
    #[must_use]
    pub fn new(
        element: impl Into<String>,
        relationship_type: RelationshipType,
        related: impl Into<String>,
    ) -> Self {
        Self {
            element: element.into(),
            relationship_type,
            related: related.into(),
        }
    }
}

/// SPDX relationship type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    Contains,
    DependsOn,
    Describes,
    /// Any other SPDX relationship, kept verbatim
    Other(String),
}

impl RelationshipType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Contains => "CONTAINS",
            Self::DependsOn => "DEPENDS_ON",
            Self::Describes => "DESCRIBES",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CONTAINS" => Self::Contains,
            "DEPENDS_ON" => Self::DependsOn,
            "DESCRIBES" => Self::Describes,
            _ => Self::Other(s),
        }
    }
}

impl From<RelationshipType> for String {
    fn from(t: RelationshipType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
