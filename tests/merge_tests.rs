//! Merge behavior tests.
//!
//! These tests exercise the public merge API end to end with documents built
//! in memory, covering precedence, de-duplication and the synthesized
//! structure of the merged document.

use sbom_merge::merge::{merge, MergeOptions, Merger};
use sbom_merge::model::{
    BomsByTool, ExternalRef, RelationshipType, SpdxDocument, SpdxFile, SpdxPackage,
    DOCUMENT_ID, NOASSERTION, ROOT_PACKAGE_ID, SCAN_PACKAGE_ID,
};

// ============================================================================
// Helpers
// ============================================================================

fn doc(files: Vec<SpdxFile>, packages: Vec<SpdxPackage>) -> SpdxDocument {
    SpdxDocument {
        files,
        packages,
        ..SpdxDocument::default()
    }
}

fn boms(entries: Vec<(&str, SpdxDocument)>) -> BomsByTool {
    entries
        .into_iter()
        .map(|(tool, doc)| (tool.to_string(), doc))
        .collect()
}

fn options(authoritative: &str) -> MergeOptions {
    MergeOptions::new("/work/repo").authoritative_tool(authoritative)
}

/// Merged packages without the root package
fn real_packages(doc: &SpdxDocument) -> &[SpdxPackage] {
    &doc.packages[1..]
}

// ============================================================================
// Scenario
// ============================================================================

mod scenario {
    use super::*;

    fn scenario_input() -> BomsByTool {
        let libfoo = || {
            SpdxPackage::new("libfoo", "1.0")
                .with_id("SPDXRef-Package-libfoo")
                .with_external_ref(ExternalRef::purl("pkg:golang/libfoo@1.0"))
        };
        boms(vec![
            (
                "toolA",
                doc(
                    vec![SpdxFile::new("./src/a.go").with_checksum("SHA1", "x1")],
                    vec![libfoo()],
                ),
            ),
            (
                "toolB",
                doc(
                    vec![SpdxFile::new("src/a.go")
                        .with_checksum("SHA1", "x1")
                        .with_license("MIT")],
                    vec![libfoo()],
                ),
            ),
        ])
    }

    #[test]
    fn single_file_with_authoritative_license() {
        let merged = merge(scenario_input(), &options("toolB"));

        assert_eq!(merged.files.len(), 1);
        assert_eq!(merged.files[0].id, "SPDXRef-File-src/a.go-x1");
        assert_eq!(merged.files[0].license_info_in_file, vec!["MIT"]);
    }

    #[test]
    fn root_plus_one_package() {
        let merged = merge(scenario_input(), &options("toolB"));

        assert_eq!(merged.packages.len(), 2);
        assert_eq!(merged.packages[0].id, ROOT_PACKAGE_ID);
        assert_eq!(merged.packages[1].name, "libfoo");

        let refs = &merged.packages[1].external_refs;
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].comment.matches("Found by toolA Tool.").count(), 1);
        assert_eq!(refs[0].comment.matches("Found by toolB Tool.").count(), 1);
    }

    #[test]
    fn two_relationships_root_excluded() {
        let merged = merge(scenario_input(), &options("toolB"));

        assert_eq!(merged.relationships.len(), 2);
        assert_eq!(merged.relationships[0].relationship_type, RelationshipType::Contains);
        assert_eq!(merged.relationships[0].related, "SPDXRef-File-src/a.go-x1");
        assert_eq!(merged.relationships[1].relationship_type, RelationshipType::DependsOn);
        assert_eq!(merged.relationships[1].related, "SPDXRef-Package-libfoo");
        assert!(merged
            .relationships
            .iter()
            .all(|rel| rel.related != ROOT_PACKAGE_ID));
    }

    #[test]
    fn identity_fields_are_stamped() {
        let merged = merge(scenario_input(), &options("toolB"));

        assert_eq!(merged.id, DOCUMENT_ID);
        assert_eq!(merged.name, "SPDX-SBOM-/work/repo");
        assert_eq!(merged.version, "SPDX-2.2");
        assert_eq!(merged.data_license, "CC0-1.0");
        assert_eq!(merged.document_describes, vec![SCAN_PACKAGE_ID]);
    }
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use super::*;

    fn sample() -> SpdxDocument {
        doc(
            vec![
                SpdxFile::new("./go.mod").with_checksum("SHA1", "aa"),
                SpdxFile::new("cmd/main.go")
                    .with_checksum("SHA1", "bb")
                    .with_license("Apache-2.0"),
            ],
            vec![
                SpdxPackage::new("cobra", "1.8.0")
                    .with_external_ref(ExternalRef::purl("pkg:golang/github.com/spf13/cobra@1.8.0")),
                SpdxPackage::new("pflag", "1.0.5"),
            ],
        )
    }

    #[test]
    fn dedup_idempotence() {
        let alone = merge(boms(vec![("syft", sample())]), &options("k8s-bom"));
        let twice = merge(
            boms(vec![("syft", sample()), ("syft-copy", sample())]),
            &options("k8s-bom"),
        );

        assert_eq!(alone.files.len(), twice.files.len());
        assert_eq!(alone.packages.len(), twice.packages.len());

        let comment = &twice.packages[1].external_refs[0].comment;
        assert_eq!(comment.matches("Found by syft Tool.").count(), 1);
        assert_eq!(comment.matches("Found by syft-copy Tool.").count(), 1);
    }

    #[test]
    fn repeated_ref_from_one_tool_is_attributed_once() {
        let purl = ExternalRef::purl("pkg:npm/foo@1");
        let package = SpdxPackage::new("foo", "1")
            .with_external_ref(purl.clone())
            .with_external_ref(purl);
        let merged = merge(
            boms(vec![("A", doc(vec![], vec![package]))]),
            &options("k8s-bom"),
        );

        let refs = &merged.packages[1].external_refs;
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].comment, "Found by A Tool. ");
    }

    #[test]
    fn authoritative_precedence_is_order_independent() {
        let plain = || doc(vec![SpdxFile::new("lib/x.c").with_license("GPL-2.0-only")], vec![]);
        let detector = || {
            doc(
                vec![SpdxFile::new("./lib/x.c")
                    .with_license("MIT")
                    .with_license("BSD-3-Clause")],
                vec![],
            )
        };

        let first = merge(
            boms(vec![("k8s-bom", detector()), ("syft", plain())]),
            &options("k8s-bom"),
        );
        let last = merge(
            boms(vec![("syft", plain()), ("k8s-bom", detector())]),
            &options("k8s-bom"),
        );

        for merged in [&first, &last] {
            assert_eq!(merged.files.len(), 1);
            assert_eq!(merged.files[0].license_info_in_file, vec!["MIT", "BSD-3-Clause"]);
        }
    }

    #[test]
    fn non_authoritative_tools_keep_first_seen() {
        let merged = merge(
            boms(vec![
                ("syft", doc(vec![SpdxFile::new("a").with_license("MIT")], vec![])),
                ("trivy", doc(vec![SpdxFile::new("a").with_license("ISC")], vec![])),
            ]),
            &options("k8s-bom"),
        );

        assert_eq!(merged.files[0].license_info_in_file, vec!["MIT"]);
    }

    #[test]
    fn path_normalization_collapses_entries() {
        let merged = merge(
            boms(vec![
                ("A", doc(vec![SpdxFile::new("./a/b.txt")], vec![])),
                ("B", doc(vec![SpdxFile::new("a/b.txt")], vec![])),
            ]),
            &options("k8s-bom"),
        );

        assert_eq!(merged.files.len(), 1);
        assert_eq!(merged.files[0].name, "a/b.txt");
        // No SHA1: empty identifier suffix
        assert_eq!(merged.files[0].id, "SPDXRef-File-a/b.txt-");
    }

    #[test]
    fn single_source_container_is_dropped() {
        let container = SpdxPackage::new("scan", "").with_file("SPDXRef-File-a");
        let merged = merge(
            boms(vec![("syft", doc(vec![], vec![container]))]),
            &options("k8s-bom"),
        );
        assert!(real_packages(&merged).is_empty());

        let plain = SpdxPackage::new("scan", "");
        let merged = merge(
            boms(vec![("syft", doc(vec![], vec![plain]))]),
            &options("k8s-bom"),
        );
        assert_eq!(real_packages(&merged).len(), 1);
    }

    #[test]
    fn container_reported_by_two_tools_is_kept() {
        let container = || SpdxPackage::new("scan", "").with_file("SPDXRef-File-a");
        let merged = merge(
            boms(vec![
                ("syft", doc(vec![], vec![container()])),
                ("trivy", doc(vec![], vec![container()])),
            ]),
            &options("k8s-bom"),
        );

        assert_eq!(real_packages(&merged).len(), 1);
    }

    #[test]
    fn unnamed_packages_are_dropped() {
        let merged = merge(
            boms(vec![
                ("syft", doc(vec![], vec![SpdxPackage::new("", "1.0")])),
                ("trivy", doc(vec![], vec![SpdxPackage::new("", "1.0")])),
            ]),
            &options("k8s-bom"),
        );

        assert!(real_packages(&merged).is_empty());
    }

    #[test]
    fn root_package_completeness() {
        let merged = merge(
            boms(vec![
                (
                    "k8s-bom",
                    doc(
                        vec![
                            SpdxFile::new("a").with_license("MIT").with_license("ISC"),
                            SpdxFile::new("b").with_license("MIT"),
                        ],
                        vec![],
                    ),
                ),
                ("syft", doc(vec![SpdxFile::new("c").with_license("Apache-2.0")], vec![])),
            ]),
            &options("k8s-bom"),
        );

        let root = &merged.packages[0];
        assert_eq!(root.has_files.len(), merged.files.len());
        assert_eq!(root.has_files, merged.file_ids());
        assert_eq!(root.license_info_from_files, vec!["MIT", "ISC", "Apache-2.0"]);
        assert_eq!(root.license_concluded, NOASSERTION);
        assert_eq!(root.license_declared, NOASSERTION);
        assert_eq!(root.download_location, "NONE");
    }

    #[test]
    fn relationship_completeness() {
        let merged = merge(boms(vec![("syft", sample())]), &options("k8s-bom"));

        let files = merged.files.len();
        let packages = real_packages(&merged).len();
        assert_eq!(merged.relationships.len(), files + packages);

        let (contains, depends) = merged.relationships.split_at(files);
        assert!(contains
            .iter()
            .all(|rel| rel.relationship_type == RelationshipType::Contains));
        assert!(depends
            .iter()
            .all(|rel| rel.relationship_type == RelationshipType::DependsOn));
        assert!(merged
            .relationships
            .iter()
            .all(|rel| rel.element == SCAN_PACKAGE_ID));
    }

    #[test]
    fn empty_input_yields_root_only() {
        let outcome = Merger::new(options("k8s-bom")).merge(BomsByTool::new());

        assert!(outcome.document.files.is_empty());
        assert!(outcome.document.relationships.is_empty());
        assert_eq!(outcome.document.packages.len(), 1);
        assert!(outcome.document.creation_info.creators.is_empty());
        assert_eq!(outcome.stats.tools, 0);
    }
}

// ============================================================================
// Metadata
// ============================================================================

mod metadata {
    use super::*;

    fn with_creation(creators: &[&str], license_list_version: &str) -> SpdxDocument {
        let mut doc = SpdxDocument::default();
        doc.creation_info.creators = creators.iter().map(ToString::to_string).collect();
        doc.creation_info.license_list_version = license_list_version.to_string();
        doc
    }

    #[test]
    fn creators_follow_tool_order() {
        let merged = merge(
            boms(vec![
                ("k8s-bom", with_creation(&["Tool: k8s-bom-v0.5.1"], "3.19")),
                ("syft", with_creation(&["Organization: Anchore", "Tool: syft-0.80.0"], "3.20")),
            ]),
            &options("k8s-bom"),
        );

        assert_eq!(
            merged.creation_info.creators,
            vec!["Tool: k8s-bom-v0.5.1", "Organization: Anchore", "Tool: syft-0.80.0"]
        );
    }

    #[test]
    fn license_list_version_takes_maximum() {
        let merged = merge(
            boms(vec![
                ("a", with_creation(&[], "3.9")),
                ("b", with_creation(&[], "3.20")),
                ("c", with_creation(&[], "")),
            ]),
            &options("k8s-bom"),
        );

        assert_eq!(merged.creation_info.license_list_version, "3.20");
    }

    #[test]
    fn equal_license_list_versions_keep_first_seen() {
        let merged = merge(
            boms(vec![
                ("a", with_creation(&[], "3")),
                ("b", with_creation(&[], "3.0")),
            ]),
            &options("k8s-bom"),
        );

        assert_eq!(merged.creation_info.license_list_version, "3");
    }

    #[test]
    fn created_is_rfc3339() {
        let merged = merge(BomsByTool::new(), &options("k8s-bom"));
        assert!(chrono::DateTime::parse_from_rfc3339(&merged.creation_info.created).is_ok());
    }
}

// ============================================================================
// Determinism
// ============================================================================

mod determinism {
    use super::*;

    #[test]
    fn sorted_output_is_independent_of_tool_order() {
        let a = || {
            let mut d = doc(
                vec![SpdxFile::new("z.go"), SpdxFile::new("m.go")],
                vec![SpdxPackage::new("zap", "1.27.0"), SpdxPackage::new("atomic", "1.11.0")],
            );
            d.creation_info.creators = vec!["Tool: syft-0.80.0".to_string()];
            d
        };
        let b = || {
            let mut d = doc(
                vec![SpdxFile::new("a.go")],
                vec![SpdxPackage::new("multierr", "1.11.0")],
            );
            d.creation_info.creators = vec!["Tool: trivy-0.50.0".to_string()];
            d
        };

        let sorted = options("k8s-bom").sort_output(true);
        let first = Merger::new(sorted.clone()).merge(boms(vec![("syft", a()), ("trivy", b())]));
        let second = Merger::new(sorted).merge(boms(vec![("trivy", b()), ("syft", a())]));

        let names = |doc: &SpdxDocument| -> Vec<String> {
            doc.files.iter().map(|f| f.name.clone()).collect()
        };
        assert_eq!(names(&first.document), vec!["a.go", "m.go", "z.go"]);
        assert_eq!(names(&first.document), names(&second.document));
        assert_eq!(first.document.packages, second.document.packages);
        assert_eq!(first.document.relationships, second.document.relationships);
        assert_eq!(
            first.document.creation_info.creators,
            second.document.creation_info.creators
        );
        assert_eq!(
            first.document.creation_info.creators,
            vec!["Tool: syft-0.80.0", "Tool: trivy-0.50.0"]
        );
    }
}
