//! Shared utilities.

mod hash;
mod version;

pub use hash::{content_hash, document_hash};
pub use version::compare_versions;
