//! Property tests for apiver-model
//!
//! Aggregation is commutative, idempotent on its own outputs, and never
//! reports a supported version as deprecated.

use apiver_core::ApiVersion;
use apiver_model::ApiVersionModel;
use proptest::prelude::*;

fn arb_versions() -> impl Strategy<Value = Vec<ApiVersion>> {
    proptest::collection::vec((0u64..6, 0u64..6).prop_map(|(m, n)| ApiVersion::new(m, n)), 0..8)
}

fn arb_model() -> impl Strategy<Value = ApiVersionModel> {
    (arb_versions(), arb_versions(), arb_versions())
        .prop_map(|(declared, supported, deprecated)| {
            ApiVersionModel::new(declared, supported, deprecated)
        })
}

proptest! {
    #[test]
    fn prop_aggregate_is_commutative(a in arb_model(), b in arb_model()) {
        prop_assert_eq!(a.aggregate(&b), b.aggregate(&a));
    }

    /// aggregate(A, A) == A for every constructed model, including ones
    /// built with a version named in both supported and deprecated.
    #[test]
    fn prop_aggregate_is_idempotent(a in arb_model()) {
        prop_assert_eq!(&a.aggregate(&a), &a);
        prop_assert_eq!(ApiVersionModel::aggregate_all([&a]), a);
    }

    #[test]
    fn prop_deprecated_never_overlaps_supported(a in arb_model(), b in arb_model()) {
        let merged = a.aggregate(&b);
        for version in merged.deprecated() {
            prop_assert!(!merged.supported().contains(version));
        }
    }

    /// Everything supported or deprecated anywhere stays implemented.
    #[test]
    fn prop_implemented_covers_both_sides(a in arb_model(), b in arb_model()) {
        let merged = a.aggregate(&b);
        for version in a.implemented().iter().chain(b.implemented()) {
            prop_assert!(merged.implemented().contains(version));
        }
    }

    #[test]
    fn prop_collections_stay_sorted_and_unique(a in arb_model(), b in arb_model()) {
        let merged = a.aggregate(&b);
        for list in [merged.declared(), merged.implemented(), merged.supported(), merged.deprecated()] {
            prop_assert!(list.windows(2).all(|w| w[0] < w[1]));
        }
    }

    /// Folding pairwise agrees with the n-ary reduction.
    #[test]
    fn prop_aggregate_all_matches_pairwise_fold(models in proptest::collection::vec(arb_model(), 1..5)) {
        let reduced = ApiVersionModel::aggregate_all(models.iter());
        let folded = models[1..]
            .iter()
            .fold(models[0].clone(), |acc, model| acc.aggregate(model));
        prop_assert_eq!(reduced, folded);
    }
}
