#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_merge::parsers::{DocumentParser, SpdxParser};

/// Fuzz format detection without parsing.
///
/// Exercises the JSON and tag-value heuristics, including version
/// extraction from partial documents.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = sbom_merge::parsers::detect_format(s);
        let _ = SpdxParser::new().detect(s);
    }
});
