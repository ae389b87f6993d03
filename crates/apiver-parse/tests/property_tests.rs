//! Property tests for apiver-parse
//!
//! Parser totality and agreement between the throwing and non-throwing
//! entry points.

use apiver_core::VersionError;
use apiver_parse::{parse, parse_namespace, try_parse, try_parse_segment};
use proptest::prelude::*;

proptest! {
    /// The parser never panics, whatever the input.
    #[test]
    fn prop_parse_is_total(input in "\\PC*") {
        let _ = parse(&input);
        let _ = try_parse_segment(&input);
        let _ = parse_namespace(&input);
    }

    /// try_parse is exactly parse with the error kind discarded.
    #[test]
    fn prop_try_parse_agrees(input in "\\PC*") {
        prop_assert_eq!(try_parse(&input), parse(&input).ok());
    }

    /// Well-formed numeric input always parses to its components.
    #[test]
    fn prop_numeric_components_round_trip(major in 0u64..10_000, minor in proptest::option::of(0u64..10_000)) {
        let text = match minor {
            Some(minor) => format!("{major}.{minor}"),
            None => major.to_string(),
        };
        let v = parse(&text).unwrap();
        prop_assert_eq!(v.major(), Some(major));
        prop_assert_eq!(v.minor(), minor);
    }

    /// Date-shaped prefixes never produce the generic error.
    #[test]
    fn prop_date_shape_gets_specific_error(y in 0u32..10_000, m in 13u32..100, d in 0u32..100) {
        let text = format!("{y:04}-{m:02}-{d:02}");
        prop_assert_eq!(
            parse(&text),
            Err(VersionError::MalformedGroupDate(text.clone()))
        );
    }

    /// Every version found in a namespace is from a v-prefixed segment.
    #[test]
    fn prop_namespace_hits_come_from_segments(segments in proptest::collection::vec("[a-z]{1,8}", 0..5)) {
        // No segment starts with a digit-bearing v-prefix, so no hits.
        let joined = segments.join(".");
        let hits = parse_namespace(&joined)
            .into_iter()
            .filter(|v| v.major().is_some() || v.group().is_some())
            .count();
        let candidates = segments
            .iter()
            .filter(|s| try_parse_segment(s).is_some())
            .count();
        prop_assert_eq!(hits, candidates);
    }
}
