//! Content hashing utilities.

use crate::model::SpdxDocument;
use xxhash_rust::xxh3::xxh3_64;

/// Compute a content hash for arbitrary bytes
#[must_use]
pub fn content_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}

/// Hash a document's content, ignoring its creation timestamp.
///
/// Two merges of the same inputs differ only in `created`, so this is the
/// value to compare when checking that a merge is reproducible.
#[must_use]
pub fn document_hash(doc: &SpdxDocument) -> u64 {
    let mut stable = doc.clone();
    stable.creation_info.created.clear();
    match serde_json::to_vec(&stable) {
        Ok(bytes) => content_hash(&bytes),
        Err(e) => {
            tracing::warn!("Failed to serialize document for hashing: {}", e);
            0
        }
    }
}
