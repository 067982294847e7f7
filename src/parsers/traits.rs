//! Parser trait definitions and error types.
//!
//! This module defines the `DocumentParser` trait implemented by the SPDX
//! loader and the confidence scoring used to pick a serialization variant.

use crate::model::SpdxDocument;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading an SPDX document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("Invalid SBOM structure: {0}")]
    InvalidStructure(String),

    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(String),

    #[error("Unknown SBOM format: {0}")]
    UnknownFormat(String),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

/// Confidence level for format detection
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct FormatConfidence(f32);

impl FormatConfidence {
    /// No confidence - definitely not this format
    pub const NONE: Self = Self(0.0);
    /// Low confidence - might be this format
    pub const LOW: Self = Self(0.25);
    /// Medium confidence - likely this format
    pub const MEDIUM: Self = Self(0.5);
    /// High confidence - almost certainly this format
    pub const HIGH: Self = Self(0.75);
    /// Certain - definitely this format
    pub const CERTAIN: Self = Self(1.0);

    /// Get the confidence value
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Check if this confidence indicates the format can be parsed
    #[must_use]
    pub fn can_parse(&self) -> bool {
        self.0 >= Self::LOW.0
    }
}

/// Serialization variant of an SPDX document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpdxVariant {
    Json,
    TagValue,
}

impl std::fmt::Display for SpdxVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::TagValue => write!(f, "tag-value"),
        }
    }
}

/// Detection result from a parser
#[derive(Debug, Clone, Default)]
pub struct FormatDetection {
    /// Confidence that this parser can handle the content
    pub confidence: FormatConfidence,
    /// Detected serialization variant
    pub variant: Option<SpdxVariant>,
    /// Detected version if applicable (e.g. "2.2")
    pub version: Option<String>,
    /// Any issues detected that might affect parsing
    pub warnings: Vec<String>,
}

impl FormatDetection {
    /// Create a detection result indicating no match
    #[must_use]
    pub fn no_match() -> Self {
        Self::default()
    }

    /// Create a detection result with confidence and variant
    #[must_use]
    pub fn with_confidence(confidence: FormatConfidence, variant: SpdxVariant) -> Self {
        Self {
            confidence,
            variant: Some(variant),
            ..Self::default()
        }
    }

    /// Set the detected version
    #[must_use]
    pub fn version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Add a warning
    #[must_use]
    pub fn warning(mut self, warning: &str) -> Self {
        self.warnings.push(warning.to_string());
        self
    }
}

/// Trait for SBOM document parsers
///
/// Implementors provide format detection via `detect()` and parsing via
/// `parse_str()`.
pub trait DocumentParser {
    /// Parse a document from a file path
    fn parse(&self, path: &Path) -> Result<SpdxDocument, ParseError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Parse a document from string content
    fn parse_str(&self, content: &str) -> Result<SpdxDocument, ParseError>;

    /// Get supported format versions
    fn supported_versions(&self) -> Vec<&str>;

    /// Get format name
    fn format_name(&self) -> &str;

    /// Detect if this parser can handle the given content
    ///
    /// This performs lightweight structural checks without full parsing.
    fn detect(&self, content: &str) -> FormatDetection;

    /// Quick check if this parser can likely handle the content
    fn can_parse(&self, content: &str) -> bool {
        self.detect(content).confidence.can_parse()
    }
}
