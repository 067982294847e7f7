//! File merge: path normalization, tool-precedence dedup and ID synthesis.

use crate::model::{file_id, BomsByTool, SpdxFile};
use indexmap::IndexMap;

/// Clean a slash-separated path lexically.
///
/// Repeated separators collapse, `.` segments are dropped and `..` removes
/// the preceding segment. Leading `..` segments are kept for relative paths
/// and dropped for rooted ones. The result never ends in `/` (except the
/// root itself) and an empty result becomes `"."`.
#[must_use]
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Rewrite every file name of every tool's document to its cleaned form.
pub fn normalize_file_paths(boms: &mut BomsByTool) {
    for doc in boms.values_mut() {
        for file in &mut doc.files {
            file.name = clean_path(&file.name);
        }
    }
}

/// Merge the files of all tools into one entry per normalized name.
///
/// The first record seen for a name is kept, except that a record from
/// `authoritative_tool` always replaces whatever is there. That tool is the
/// one detecting licenses inside files, so its record wins independently of
/// tool order. Each selected file gets a synthesized ID built from its name
/// and SHA1 checksum.
///
/// File names in `boms` are normalized in place as a side effect.
pub fn merged_files(boms: &mut BomsByTool, authoritative_tool: &str) -> Vec<SpdxFile> {
    normalize_file_paths(boms);

    let mut file_by_name: IndexMap<String, SpdxFile> = IndexMap::new();
    for (tool, doc) in boms.iter() {
        let authoritative = tool == authoritative_tool;
        for file in &doc.files {
            // IndexMap::insert keeps the original position of a replaced key
            if authoritative || !file_by_name.contains_key(&file.name) {
                file_by_name.insert(file.name.clone(), file.clone());
            }
        }
    }

    file_by_name
        .into_values()
        .map(|mut file| {
            let sha1 = file.sha1().unwrap_or_default().to_string();
            file.id = file_id(&file.name, &sha1);
            file
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpdxDocument;

    fn doc_with_files(files: Vec<SpdxFile>) -> SpdxDocument {
        SpdxDocument {
            files,
            ..SpdxDocument::default()
        }
    }

    #[test]
    fn test_clean_path() {
        let cases = [
            ("", "."),
            (".", "."),
            ("./a/b.txt", "a/b.txt"),
            ("a/b.txt", "a/b.txt"),
            ("a//b/", "a/b"),
            ("a/./b/../c", "a/c"),
            ("a/../..", ".."),
            ("../../a", "../../a"),
            ("/..", "/"),
            ("/a/../../b", "/b"),
            ("/", "/"),
            ("///usr//lib/", "/usr/lib"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_path(input), expected, "clean_path({input:?})");
        }
    }

    #[test]
    fn test_normalize_rewrites_all_tools() {
        let mut boms = BomsByTool::new();
        boms.insert("a".into(), doc_with_files(vec![SpdxFile::new("./x/y")]));
        boms.insert("b".into(), doc_with_files(vec![SpdxFile::new("x//y/")]));

        normalize_file_paths(&mut boms);

        assert_eq!(boms["a"].files[0].name, "x/y");
        assert_eq!(boms["b"].files[0].name, "x/y");
    }

    #[test]
    fn test_first_non_authoritative_record_wins() {
        let mut boms = BomsByTool::new();
        boms.insert(
            "syft".into(),
            doc_with_files(vec![SpdxFile::new("a.txt").with_license("MIT")]),
        );
        boms.insert(
            "trivy".into(),
            doc_with_files(vec![SpdxFile::new("a.txt").with_license("GPL-2.0-only")]),
        );

        let files = merged_files(&mut boms, "k8s-bom");

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].license_info_in_file, vec!["MIT"]);
    }

    #[test]
    fn test_authoritative_record_wins_regardless_of_order() {
        for authoritative_first in [true, false] {
            let mut boms = BomsByTool::new();
            let auth = doc_with_files(vec![SpdxFile::new("./a.txt").with_license("Apache-2.0")]);
            let other = doc_with_files(vec![SpdxFile::new("a.txt")]);
            if authoritative_first {
                boms.insert("k8s-bom".into(), auth);
                boms.insert("syft".into(), other);
            } else {
                boms.insert("syft".into(), other);
                boms.insert("k8s-bom".into(), auth);
            }

            let files = merged_files(&mut boms, "k8s-bom");

            assert_eq!(files.len(), 1);
            assert_eq!(files[0].license_info_in_file, vec!["Apache-2.0"]);
        }
    }

    #[test]
    fn test_file_ids_use_name_and_sha1() {
        let mut boms = BomsByTool::new();
        boms.insert(
            "syft".into(),
            doc_with_files(vec![
                SpdxFile::new("./src/a.go").with_checksum("SHA1", "x1"),
                SpdxFile::new("README.md").with_checksum("SHA256", "ff"),
            ]),
        );

        let files = merged_files(&mut boms, "k8s-bom");

        assert_eq!(files[0].id, "SPDXRef-File-src/a.go-x1");
        assert_eq!(files[1].id, "SPDXRef-File-README.md-");
    }
}
