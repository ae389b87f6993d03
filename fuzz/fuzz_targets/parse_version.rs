//! Fuzz harness for version text parsing
//!
//! Feeds arbitrary text through the delimited parser; both the error and
//! success paths must terminate without panicking, and a successful parse
//! must render back to something the parser accepts again.

#![no_main]

use apiver_format::format;
use apiver_parse::{parse, try_parse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let result = parse(text);

    // The non-throwing variant must agree with the throwing one.
    assert_eq!(try_parse(text), result.as_ref().ok().cloned());

    if let Ok(version) = result {
        let rendered = format(&version, "F").expect("canonical format string");
        let reparsed = parse(&rendered).expect("canonical form reparses");
        assert_eq!(reparsed, version);
    }
});
