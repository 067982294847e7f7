//! SPDX document model shared by the loaders, the merge core and the writer.
//!
//! The structures mirror the SPDX 2.2 JSON schema closely enough that a
//! document produced by any of the supported generators can be deserialized
//! directly, and the merged document can be serialized without a separate
//! output representation.
//!
//! ```
//! use sbom_merge::model::{BomsByTool, SpdxDocument};
//!
//! let mut boms = BomsByTool::new();
//! boms.insert("syft".to_string(), SpdxDocument::default());
//! assert_eq!(boms.len(), 1);
//! ```

mod document;
mod identifiers;

pub use document::*;
pub use identifiers::*;
