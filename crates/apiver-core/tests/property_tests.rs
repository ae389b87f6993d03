//! Property tests for apiver-core
//!
//! Ordering lawfulness and hash/equality coherence for `ApiVersion`.

use apiver_core::ApiVersion;
use chrono::NaiveDate;
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of(v: &ApiVersion) -> u64 {
    let mut h = DefaultHasher::new();
    v.hash(&mut h);
    h.finish()
}

prop_compose! {
    fn arb_group()(y in 2000i32..2100, m in 1u32..=12, d in 1u32..=28) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }
}

/// Any version the surface grammar can produce: at least a group or a major.
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
    /// Exactly one of <, ==, > holds for every pair.
    #[test]
    fn prop_order_is_total(a in arb_version(), b in arb_version()) {
        let lt = a < b;
        let eq = a == b;
        let gt = a > b;
        prop_assert_eq!(u8::from(lt) + u8::from(eq) + u8::from(gt), 1);
        // compare() agrees with the operators
        match a.compare(&b) {
            Ordering::Less => prop_assert!(lt),
            Ordering::Equal => prop_assert!(eq),
            Ordering::Greater => prop_assert!(gt),
        }
    }

    /// Sorting a shuffled list is idempotent and deterministic.
    #[test]
    fn prop_sorting_is_deterministic(mut versions in proptest::collection::vec(arb_version(), 0..12)) {
        versions.sort();
        let once = versions.clone();
        versions.sort();
        prop_assert_eq!(once, versions);
    }

    /// a <= b and b <= c imply a <= c; mutual <= implies equality.
    #[test]
    fn prop_order_is_transitive_and_antisymmetric(a in arb_version(), b in arb_version(), c in arb_version()) {
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
        if a <= b && b <= a {
            prop_assert_eq!(&a, &b);
        }
    }

    /// a == b implies hash(a) == hash(b).
    #[test]
    fn prop_hash_eq_coherence(a in arb_version(), b in arb_version()) {
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    /// Constructor overloads describing the same logical version agree.
    #[test]
    fn prop_major_only_equals_minor_zero(major in 0u64..1000) {
        let implied = ApiVersion::from_major(major);
        let explicit = ApiVersion::new(major, 0);
        prop_assert_eq!(&implied, &explicit);
        prop_assert_eq!(hash_of(&implied), hash_of(&explicit));
    }

    /// Status case never affects equality, hashing, or ordering.
    #[test]
    fn prop_status_case_insensitive(major in 0u64..100, status in "[A-Za-z]{1,8}") {
        let lower = ApiVersion::try_new(None, Some(major), None, Some(&status.to_lowercase())).unwrap();
        let upper = ApiVersion::try_new(None, Some(major), None, Some(&status.to_uppercase())).unwrap();
        prop_assert_eq!(&lower, &upper);
        prop_assert_eq!(hash_of(&lower), hash_of(&upper));
        prop_assert_eq!(lower.cmp(&upper), Ordering::Equal);
    }
}
