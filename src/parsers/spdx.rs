//! SPDX document loader.
//!
//! Supports SPDX versions 2.2 and 2.3 in JSON and tag-value formats. JSON is
//! deserialized straight into the document model; tag-value is read line by
//! line.

use crate::model::{
    Checksum, CreationInfo, ExternalRef, Relationship, SpdxDocument, SpdxFile, SpdxPackage,
};
use crate::parsers::traits::{
    DocumentParser, FormatConfidence, FormatDetection, ParseError, SpdxVariant,
};
use std::str::Lines;

/// Parser for SPDX SBOM documents
#[derive(Debug, Clone, Copy, Default)]
pub struct SpdxParser;

/// Tag-value section the parser is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Document,
    Package(usize),
    File(usize),
    /// Snippets and extracted licensing info; their fields are skipped
    Ignored,
}

impl SpdxParser {
    /// Create a new SPDX parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse SPDX JSON format
    fn parse_json(&self, content: &str) -> Result<SpdxDocument, ParseError> {
        let doc: SpdxDocument = serde_json::from_str(content)?;
        // Any JSON object deserializes into the lenient model
        if doc.version.is_empty() && doc.id.is_empty() {
            return Err(ParseError::InvalidStructure(
                "JSON object has neither spdxVersion nor SPDXID".to_string(),
            ));
        }
        Ok(doc)
    }

    /// Reject documents from another SPDX major version; warn on untested 2.x
    fn check_version(&self, doc: &SpdxDocument) -> Result<(), ParseError> {
        if doc.version.is_empty() {
            return Ok(());
        }
        let version = strip_spdx_prefix(&doc.version);
        if !version.starts_with("2.") {
            return Err(ParseError::UnsupportedVersion(doc.version.clone()));
        }
        if !self.supported_versions().contains(&version.as_str()) {
            tracing::warn!("SPDX version {version} is not explicitly supported, parsing anyway");
        }
        Ok(())
    }

    /// Parse tag-value format
    fn parse_tag_value(&self, content: &str) -> Result<SpdxDocument, ParseError> {
        let mut doc = SpdxDocument::default();
        let mut creation_info = CreationInfo::default();
        let mut section = Section::Document;
        // Package that files listed after it belong to
        let mut owner: Option<usize> = None;

        let mut lines = content.lines();
        while let Some(line) = lines.next() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = read_value(value.trim(), &mut lines);

            match (key, section) {
                ("SPDXVersion", _) => doc.version = value,
                ("DataLicense", _) => doc.data_license = value,
                ("DocumentName", _) => doc.name = value,
                ("DocumentNamespace", _) => doc.document_namespace = Some(value),
                ("Creator", _) => creation_info.creators.push(value),
                ("Created", _) => creation_info.created = value,
                ("LicenseListVersion", _) => creation_info.license_list_version = value,
                ("CreatorComment", _) => creation_info.comment = Some(value),
                ("Relationship", _) => {
                    if let Some(rel) = Self::parse_relationship_line(&value) {
                        doc.relationships.push(rel);
                    }
                }

                ("PackageName", _) => {
                    doc.packages.push(SpdxPackage::new(value, ""));
                    let idx = doc.packages.len() - 1;
                    section = Section::Package(idx);
                    owner = Some(idx);
                }
                ("FileName", _) => {
                    doc.files.push(SpdxFile::new(value));
                    section = Section::File(doc.files.len() - 1);
                }
                ("SnippetSPDXID" | "LicenseID", _) => section = Section::Ignored,

                ("SPDXID", Section::Document) => doc.id = value,
                ("SPDXID", Section::Package(i)) => doc.packages[i].id = value,
                ("SPDXID", Section::File(i)) => {
                    if let Some(pkg) = owner {
                        doc.packages[pkg].has_files.push(value.clone());
                    }
                    doc.files[i].id = value;
                }

                (_, Section::Package(i)) => Self::apply_package_field(&mut doc.packages[i], key, value),
                (_, Section::File(i)) => Self::apply_file_field(&mut doc.files[i], key, value),
                _ => {}
            }
        }

        doc.creation_info = creation_info;
        Ok(doc)
    }

    fn apply_package_field(pkg: &mut SpdxPackage, key: &str, value: String) {
        match key {
            "PackageVersion" => pkg.version = value,
            "PackageDownloadLocation" => pkg.download_location = value,
            "FilesAnalyzed" => pkg.files_analyzed = value.parse::<bool>().ok(),
            "PackageLicenseConcluded" => pkg.license_concluded = value,
            "PackageLicenseDeclared" => pkg.license_declared = value,
            "PackageLicenseInfoFromFiles" => pkg.license_info_from_files.push(value),
            "PackageCopyrightText" => pkg.copyright_text = Some(value),
            "PackageSupplier" => pkg.supplier = Some(value),
            "PackageOriginator" => pkg.originator = Some(value),
            "PackageDescription" => pkg.description = Some(value),
            "PackageChecksum" => {
                if let Some(checksum) = Self::parse_checksum_line(&value) {
                    pkg.checksums.push(checksum);
                }
            }
            "ExternalRef" => {
                if let Some(ext_ref) = Self::parse_external_ref_line(&value) {
                    pkg.external_refs.push(ext_ref);
                }
            }
            "ExternalRefComment" => {
                if let Some(ext_ref) = pkg.external_refs.last_mut() {
                    ext_ref.comment = value;
                }
            }
            _ => {}
        }
    }

    fn apply_file_field(file: &mut SpdxFile, key: &str, value: String) {
        match key {
            "FileChecksum" => {
                if let Some(checksum) = Self::parse_checksum_line(&value) {
                    file.checksums.push(checksum);
                }
            }
            "LicenseInfoInFile" => file.license_info_in_file.push(value),
            "LicenseConcluded" => file.license_concluded = Some(value),
            "FileCopyrightText" => file.copyright_text = Some(value),
            _ => {}
        }
    }

    /// Parse `ELEMENT TYPE RELATED`
    fn parse_relationship_line(value: &str) -> Option<Relationship> {
        let mut parts = value.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(rel_type), Some(related)) => Some(Relationship::new(
                element,
                rel_type.to_string().into(),
                related,
            )),
            _ => None,
        }
    }

    /// Parse `CATEGORY TYPE LOCATOR`
    fn parse_external_ref_line(value: &str) -> Option<ExternalRef> {
        let mut parts = value.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(category), Some(ref_type), Some(locator)) => {
                Some(ExternalRef::new(category, ref_type, locator))
            }
            _ => None,
        }
    }

    /// Parse `ALGORITHM: VALUE`
    fn parse_checksum_line(value: &str) -> Option<Checksum> {
        let (algorithm, checksum) = value.split_once(':')?;
        Some(Checksum::new(algorithm.trim(), checksum.trim()))
    }

    /// Extract SPDX version from JSON content (quick heuristic)
    fn extract_json_version(content: &str) -> Option<String> {
        let idx = content.find("\"spdxVersion\"")?;
        let after = &content[idx + "\"spdxVersion\"".len()..];
        let value_part = &after[after.find(':')? + 1..];
        let after_quote = &value_part[value_part.find('"')? + 1..];
        let version_str = &after_quote[..after_quote.find('"')?];
        Some(strip_spdx_prefix(version_str))
    }

    /// Extract SPDX version from tag-value content
    fn extract_tag_value_version(content: &str) -> Option<String> {
        content
            .lines()
            .find_map(|line| line.trim().strip_prefix("SPDXVersion:"))
            .map(|rest| strip_spdx_prefix(rest.trim()))
    }

    fn looks_like_tag_value(trimmed: &str) -> bool {
        trimmed.starts_with("SPDXVersion:") || trimmed.contains("\nSPDXVersion:")
    }
}

/// Read a tag value, following `<text>` blocks across lines.
fn read_value(value: &str, lines: &mut Lines<'_>) -> String {
    let Some(rest) = value.strip_prefix("<text>") else {
        return value.to_string();
    };
    if let Some((text, _)) = rest.split_once("</text>") {
        return text.to_string();
    }

    let mut text = rest.to_string();
    for line in lines.by_ref() {
        text.push('\n');
        if let Some((last, _)) = line.split_once("</text>") {
            text.push_str(last);
            break;
        }
        text.push_str(line);
    }
    text
}

fn strip_spdx_prefix(version: &str) -> String {
    version.strip_prefix("SPDX-").unwrap_or(version).to_string()
}

impl DocumentParser for SpdxParser {
    fn parse_str(&self, content: &str) -> Result<SpdxDocument, ParseError> {
        let trimmed = content.trim();
        let doc = if trimmed.starts_with('{') {
            self.parse_json(content)?
        } else if Self::looks_like_tag_value(trimmed) {
            self.parse_tag_value(content)?
        } else {
            return Err(ParseError::UnknownFormat(
                "Expected JSON or tag-value SPDX format".to_string(),
            ));
        };
        self.check_version(&doc)?;
        Ok(doc)
    }

    fn supported_versions(&self) -> Vec<&str> {
        vec!["2.2", "2.3"]
    }

    fn format_name(&self) -> &str {
        "SPDX"
    }

    fn detect(&self, content: &str) -> FormatDetection {
        let trimmed = content.trim();

        if trimmed.starts_with('{') {
            let has_spdx_version = content.contains("\"spdxVersion\"");
            let has_spdx_id = content.contains("\"SPDXID\"");
            let has_data_license = content.contains("\"dataLicense\"");
            let has_elements = content.contains("\"packages\"") || content.contains("\"files\"");
            let version = Self::extract_json_version(content);

            if has_spdx_version && has_spdx_id {
                return FormatDetection::with_confidence(FormatConfidence::CERTAIN, SpdxVariant::Json)
                    .version(version);
            } else if has_spdx_version || (has_spdx_id && has_data_license) {
                return FormatDetection::with_confidence(FormatConfidence::HIGH, SpdxVariant::Json)
                    .version(version);
            } else if has_elements && has_data_license {
                return FormatDetection::with_confidence(FormatConfidence::MEDIUM, SpdxVariant::Json)
                    .warning("Missing spdxVersion field");
            }
            return FormatDetection::no_match();
        }

        if Self::looks_like_tag_value(trimmed) {
            let version = Self::extract_tag_value_version(content);
            let confidence = if content.contains("SPDXID:") && content.contains("DataLicense:") {
                FormatConfidence::CERTAIN
            } else {
                FormatConfidence::HIGH
            };
            return FormatDetection::with_confidence(confidence, SpdxVariant::TagValue)
                .version(version);
        }

        FormatDetection::no_match()
    }
}
