#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_merge::parsers::{DocumentParser, SpdxParser};

/// Fuzz the SPDX JSON loader.
///
/// Wraps input in an SPDX JSON envelope to reach package deserialization
/// rather than failing at detection.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = SpdxParser::new();

        let _ = parser.parse_str(s);

        if s.len() < 10_000 {
            let wrapped = format!(
                r#"{{"spdxVersion":"SPDX-2.2","SPDXID":"SPDXRef-DOCUMENT","name":"fuzz","packages":[{s}]}}"#,
            );
            let _ = parser.parse_str(&wrapped);
        }
    }
});
