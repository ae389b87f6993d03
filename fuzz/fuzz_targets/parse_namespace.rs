//! Fuzz harness for namespace scanning
//!
//! Arbitrary dotted identifiers must never panic the scanner, and every
//! version it reports must come from a segment the strict segment parser
//! also accepts.

#![no_main]

use apiver_parse::{parse_namespace, try_parse_segment};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let versions = parse_namespace(text);
    let rescanned: Vec<_> = text.split('.').filter_map(try_parse_segment).collect();
    assert_eq!(versions, rescanned);
});
