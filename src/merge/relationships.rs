//! Relationship synthesis for the merged document.

use crate::model::{Relationship, RelationshipType, SpdxDocument, SCAN_PACKAGE_ID};

/// Append a CONTAINS edge for every file and a DEPENDS_ON edge for every
/// package, all anchored at the scan package.
///
/// File edges come first, each group in document order.
pub fn create_relationships(doc: &mut SpdxDocument) {
    let contains = doc
        .files
        .iter()
        .map(|file| Relationship::new(SCAN_PACKAGE_ID, RelationshipType::Contains, &file.id));
    let depends_on = doc
        .packages
        .iter()
        .map(|pkg| Relationship::new(SCAN_PACKAGE_ID, RelationshipType::DependsOn, &pkg.id));

    let synthesized: Vec<Relationship> = contains.chain(depends_on).collect();
    doc.relationships.extend(synthesized);
}
