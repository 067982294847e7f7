//! SPDX document loaders.
//!
//! Input SBOMs arrive either as SPDX JSON or as SPDX tag-value. The
//! serialization is detected from content, with a confidence score per
//! variant, and both produce the same [`SpdxDocument`] model.
//!
//! ## Usage
//!
//! ```no_run
//! use sbom_merge::parsers::{detect_format, parse_document};
//! use std::path::Path;
//!
//! let doc = parse_document(Path::new("syft.spdx.json")).unwrap();
//!
//! let content = std::fs::read_to_string("k8s-bom.spdx").unwrap();
//! if let Some(detection) = detect_format(&content) {
//!     println!("Detected: {:?} ({})", detection.variant, detection.confidence.value());
//! }
//! ```

mod spdx;
mod traits;

pub use spdx::SpdxParser;
pub use traits::{DocumentParser, FormatConfidence, FormatDetection, ParseError, SpdxVariant};

use crate::model::SpdxDocument;
use std::path::Path;

/// Maximum SBOM file size (512 MB).
pub const MAX_SBOM_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Detect the SPDX serialization of `content` without parsing it.
///
/// Returns None if the content does not look like SPDX.
#[must_use]
pub fn detect_format(content: &str) -> Option<FormatDetection> {
    let detection = SpdxParser::new().detect(content);
    detection.confidence.can_parse().then_some(detection)
}

/// Load an SPDX document from a file.
///
/// Returns an error if the file exceeds [`MAX_SBOM_FILE_SIZE`].
pub fn parse_document(path: &Path) -> Result<SpdxDocument, ParseError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_SBOM_FILE_SIZE {
        return Err(ParseError::IoError(format!(
            "SBOM file is {} MB, exceeding the {} MB limit",
            metadata.len() / (1024 * 1024),
            MAX_SBOM_FILE_SIZE / (1024 * 1024),
        )));
    }
    SpdxParser::new().parse(path)
}

/// Load an SPDX document from string content.
pub fn parse_document_str(content: &str) -> Result<SpdxDocument, ParseError> {
    let parser = SpdxParser::new();
    for warning in parser.detect(content).warnings {
        tracing::warn!("{warning}");
    }
    parser.parse_str(content)
}
