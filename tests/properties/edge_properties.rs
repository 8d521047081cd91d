use proptest::prelude::*;

use skilltree::core::{EdgeCache, EdgeVariant, NodeStatus, resolve_edge_variant};

fn node_status() -> impl Strategy<Value = NodeStatus> {
    prop::sample::select(NodeStatus::ALL.to_vec())
}

proptest! {
    #[test]
    fn resolver_is_deterministic(parent in node_status(), child in node_status()) {
        prop_assert_eq!(resolve_edge_variant(parent, child), resolve_edge_variant(parent, child));
    }

    #[test]
    fn locked_endpoints_win(parent in node_status(), child in node_status()) {
        let variant = resolve_edge_variant(parent, child);
        if parent == NodeStatus::Locked {
            prop_assert_eq!(variant, EdgeVariant::LockedDashed);
        } else if child == NodeStatus::Locked {
            prop_assert_eq!(variant, EdgeVariant::LockedSolid);
        } else if child == NodeStatus::Unlocked {
            prop_assert_eq!(variant, EdgeVariant::Available);
        }
    }

    #[test]
    fn cache_matches_direct_resolution(
        writes in prop::collection::vec((0usize..6, node_status()), 0..40)
    ) {
        let ids: Vec<String> = (0..6).map(|i| format!("n{i}")).collect();
        let mut cache = EdgeCache::new();
        for pair in ids.windows(2) {
            cache.add_edge(&pair[0], &pair[1]);
        }
        for (idx, status) in &writes {
            cache.set_status(&ids[*idx], *status);
            // interleave reads so dirty tracking gets exercised
            let _ = cache.variant(&ids[0], &ids[1]);
        }
        for pair in ids.windows(2) {
            let expected = resolve_edge_variant(cache.status(&pair[0]), cache.status(&pair[1]));
            prop_assert_eq!(cache.variant(&pair[0], &pair[1]), Some(expected));
        }
    }
}
