#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_merge::merge::{merge, MergeOptions};
use sbom_merge::model::BomsByTool;
use sbom_merge::parsers::parse_document_str;

/// Fuzz the merge over loaded documents.
///
/// Splits input on NUL bytes, loads each chunk as one tool's SBOM and merges
/// whatever loads. The merge must never panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let boms: BomsByTool = s
            .split('\0')
            .take(4)
            .enumerate()
            .filter_map(|(i, chunk)| {
                parse_document_str(chunk)
                    .ok()
                    .map(|doc| (format!("tool{i}"), doc))
            })
            .collect();

        let _ = merge(boms, &MergeOptions::new("/fuzz").authoritative_tool("tool0"));
    }
});
