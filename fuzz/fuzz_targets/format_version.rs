//! Fuzz harness for the format mini-language
//!
//! Arbitrary format strings applied to a fixed set of versions must
//! either render or report a format error; no panic and no unbounded
//! output from a short input.

#![no_main]

use apiver_core::ApiVersion;
use apiver_format::format;
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let group = NaiveDate::from_ymd_opt(2017, 1, 1).expect("valid date");
    let subjects = [
        ApiVersion::with_status(1, 5, "Alpha").expect("valid status"),
        ApiVersion::from_group(group),
        ApiVersion::try_new(Some(group), Some(2), None, Some("RC")).expect("valid version"),
        ApiVersion::neutral().clone(),
    ];

    for version in &subjects {
        if let Ok(rendered) = format(version, text) {
            // Padding is clamped, so output stays proportional to input.
            assert!(rendered.len() <= text.len() * 128 + 128);
        }
    }
});
