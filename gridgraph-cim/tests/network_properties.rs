//! Property-based tests over the sample network.
//!
//! Any arrival order must produce a store that compares equal to the one
//! loaded parents first, and any cascading removal must leave the rest of the
//! graph free of references to what was removed.

mod common;

use common::*;
use gridgraph_store::RemoveOptions;
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn shuffled_steps() -> impl Strategy<Value = Vec<Step>> {
    Just(STEPS.to_vec()).prop_shuffle()
}

fn any_mrid() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "loc1", "sub1", "fdr1", "br1", "t1", "acls1", "t2", "c1", "an1", "rs1",
    ])
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn arrival_order_does_not_matter(steps in shuffled_steps()) {
        let catalogue = catalogue();
        let expected = network(&catalogue);
        let store = load(&catalogue, &steps);

        prop_assert!(!store.has_unresolved(None));
        let report = catalogue.compare(&expected, &store).unwrap();
        prop_assert!(report.is_empty(), "{}", report);
    }

    #[test]
    fn cascading_removal_leaves_no_dangling_references(
        steps in shuffled_steps(),
        mrid in any_mrid(),
        cascade in any::<bool>(),
    ) {
        let catalogue = catalogue();
        let mut store = load(&catalogue, &steps);
        let entity = store.lookup(mrid).cloned().unwrap();
        let options = if cascade {
            RemoveOptions::cascading()
        } else {
            RemoveOptions::default()
        };

        let removed = store.remove_tree(&entity, &options).unwrap();
        prop_assert_eq!(removed.last().map(String::as_str), Some(mrid));
        prop_assert!(dangling(&store).is_empty());
        prop_assert_eq!(store.len() + removed.len(), 10);
    }
}
