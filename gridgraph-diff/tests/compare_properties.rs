//! Property-based tests for comparison.
//!
//! - Reflexivity: compare(X, X) is empty
//! - Presence: ids only on one side land in exactly one missing set

mod common;

use common::*;
use gridgraph_diff::ComparatorOptions;
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

#[derive(Debug, Clone)]
struct SensorPlan {
    id: usize,
    enabled: bool,
    gain: f64,
    readings: Vec<f64>,
}

fn gain_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(f64::NAN), -1e6f64..1e6]
}

fn sensor_strategy() -> impl Strategy<Value = SensorPlan> {
    (
        0usize..20,
        any::<bool>(),
        gain_strategy(),
        prop::collection::vec(gain_strategy(), 0..5),
    )
        .prop_map(|(id, enabled, gain, readings)| SensorPlan {
            id,
            enabled,
            gain,
            readings,
        })
}

fn build(plans: &[SensorPlan]) -> gridgraph_store::ObjectStore {
    let mut store = store();
    for plan in plans {
        let s = sensor(&format!("s{}", plan.id));
        {
            let mut s = s.borrow_mut();
            s.enabled = plan.enabled;
            s.gain = plan.gain;
            s.readings = plan.readings.clone();
        }
        store.add(&s).unwrap();
    }
    store
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// A store never differs from itself, NaN sentinels included.
    #[test]
    fn compare_with_self_is_empty(plans in prop::collection::vec(sensor_strategy(), 0..10)) {
        let store = build(&plans);
        let report = comparator(ComparatorOptions::default()).compare(&store, &store).unwrap();
        prop_assert!(report.is_empty());
    }

    /// Two stores built from the same plans compare equal.
    #[test]
    fn identical_builds_are_equal(plans in prop::collection::vec(sensor_strategy(), 0..10)) {
        let report = comparator(ComparatorOptions::default())
            .compare(&build(&plans), &build(&plans))
            .unwrap();
        prop_assert!(report.is_empty());
    }

    /// Ids present on one side only are reported on that side only.
    #[test]
    fn one_sided_ids_are_missing(
        left in prop::collection::vec(sensor_strategy(), 0..10),
        right in prop::collection::vec(sensor_strategy(), 0..10),
    ) {
        let source = build(&left);
        let target = build(&right);
        let report = comparator(ComparatorOptions::default()).compare(&source, &target).unwrap();

        let source_ids = source.ids();
        let target_ids = target.ids();
        let only_source: BTreeSet<String> = source_ids.difference(&target_ids).cloned().collect();
        let only_target: BTreeSet<String> = target_ids.difference(&source_ids).cloned().collect();

        prop_assert_eq!(&report.missing_from_target, &only_source);
        prop_assert_eq!(&report.missing_from_source, &only_target);
        for mrid in report.modifications.keys() {
            prop_assert!(source_ids.contains(mrid) && target_ids.contains(mrid));
        }
    }
}
