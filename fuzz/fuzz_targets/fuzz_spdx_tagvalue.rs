#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_merge::parsers::{DocumentParser, SpdxParser};

/// Fuzz the SPDX tag-value loader.
///
/// Prefixes input with a document header and an open package so file and
/// package fields reach their section handlers.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = SpdxParser::new();

        let _ = parser.parse_str(s);

        if s.len() < 10_000 {
            let wrapped = format!(
                "SPDXVersion: SPDX-2.2\nDataLicense: CC0-1.0\nSPDXID: SPDXRef-DOCUMENT\nDocumentName: fuzz\nPackageName: fuzz\n{s}",
            );
            let _ = parser.parse_str(&wrapped);
        }
    }
});
