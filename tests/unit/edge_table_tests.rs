use skilltree::core::{EdgeVariant, NodeStatus, resolve_edge_variant};
use skilltree::test_utils::{TestCase, run_table_tests};

use NodeStatus::{Completed, InProgress, Locked, Mastered, Unlocked};

#[test]
fn edge_rules_first_match_wins() -> Result<(), String> {
    let cases = vec![
        TestCase::new("locked parent beats everything", (Locked, Mastered), EdgeVariant::LockedDashed),
        TestCase::new("locked parent and child", (Locked, Locked), EdgeVariant::LockedDashed),
        TestCase::new("reachable parent, locked child", (Unlocked, Locked), EdgeVariant::LockedSolid),
        TestCase::new("mastered parent, locked child", (Mastered, Locked), EdgeVariant::LockedSolid),
        TestCase::new("child ready", (Completed, Unlocked), EdgeVariant::Available),
        TestCase::new("in progress parent, ready child", (InProgress, Unlocked), EdgeVariant::Available),
        TestCase::new("both mastered", (Mastered, Mastered), EdgeVariant::Mastered),
        TestCase::new("mastered into completed", (Mastered, Completed), EdgeVariant::MasteredToCompleted),
        TestCase::new("both completed", (Completed, Completed), EdgeVariant::Completed),
        TestCase::new("completed into mastered", (Completed, Mastered), EdgeVariant::InProgress),
        TestCase::new("child in progress", (Mastered, InProgress), EdgeVariant::InProgress),
        TestCase::new("unlocked parent, mastered child", (Unlocked, Mastered), EdgeVariant::InProgress),
    ];

    run_table_tests(cases, |(parent, child)| resolve_edge_variant(parent, child))
}

#[test]
fn only_locked_parent_is_dashed() {
    let all = [Locked, Unlocked, InProgress, Completed, Mastered];
    for parent in all {
        for child in all {
            let variant = resolve_edge_variant(parent, child);
            assert_eq!(variant.is_dashed(), parent == Locked, "{parent} -> {child}");
        }
    }
}
