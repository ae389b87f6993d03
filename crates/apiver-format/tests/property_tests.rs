//! Property tests for apiver-format
//!
//! Round-trip through the delimited parser and writer invariants.

use apiver_core::ApiVersion;
use apiver_format::{BoundedSink, format, format_into};
use chrono::NaiveDate;
use proptest::prelude::*;

prop_compose! {
    fn arb_group()(y in 2000i32..2100, m in 1u32..=12, d in 1u32..=28) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }
}

/// Versions the delimited grammar can produce: a group or a major.
fn arb_version() -> impl Strategy<Value = ApiVersion> {
    (
        proptest::option::of(arb_group()),
        proptest::option::of(0u64..1000),
        proptest::option::of(0u64..1000),
        proptest::option::of("[A-Za-z][A-Za-z0-9]{0,7}"),
    )
        .prop_filter_map("needs group or major", |(group, major, minor, status)| {
            if group.is_none() && major.is_none() {
                return None;
            }
            let minor = if major.is_some() { minor } else { None };
            ApiVersion::try_new(group, major, minor, status.as_deref()).ok()
        })
}

proptest! {
    /// parse(format(v, "F")) == v for every grammar-producible version.
    #[test]
    fn prop_full_form_round_trips(v in arb_version()) {
        let text = format(&v, "F").unwrap();
        let back = apiver_parse::parse(&text).unwrap();
        prop_assert_eq!(back, v);
    }

    /// The padded variants stay equal under parse even when the rendered
    /// text differs from the canonical form.
    #[test]
    fn prop_padded_form_round_trips(major in 0u64..1000, minor in 0u64..1000) {
        let v = ApiVersion::new(major, minor);
        let text = format(&v, "P4'.'p4").unwrap();
        let back = apiver_parse::parse(&text).unwrap();
        prop_assert_eq!(back, v);
    }

    /// The empty format string and "F" agree.
    #[test]
    fn prop_empty_format_is_full_form(v in arb_version()) {
        prop_assert_eq!(format(&v, "").unwrap(), format(&v, "F").unwrap());
    }

    /// A bounded sink yields a prefix of the unbounded rendering and
    /// never exceeds its capacity.
    #[test]
    fn prop_bounded_sink_is_a_prefix(v in arb_version(), capacity in 0usize..32) {
        let unbounded = format(&v, "G'.'VVVV").unwrap();
        let mut sink = BoundedSink::new(capacity);
        format_into(&v, "G'.'VVVV", &mut sink).unwrap();
        prop_assert!(sink.as_str().len() <= capacity);
        prop_assert!(unbounded.starts_with(sink.as_str()));
    }
}
