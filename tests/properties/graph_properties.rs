use std::collections::HashSet;

use proptest::prelude::*;

use skilltree::core::{ProgressStatus, Skill, SkillGraph, StatusLookup, compute_focus_branch, is_unlocked};

/// Random graphs over `n0..n{size}`; edges may point anywhere, including
/// forward (cycles) and to ids outside the graph.
fn arb_graph() -> impl Strategy<Value = SkillGraph> {
    (1usize..12).prop_flat_map(|size| {
        prop::collection::vec(prop::collection::vec(0usize..size + 2, 0..4), size).prop_map(
            |requires| {
                SkillGraph::new(
                    requires
                        .into_iter()
                        .enumerate()
                        .map(|(idx, reqs)| {
                            Skill::new(format!("n{idx}"), "s").with_requires(
                                reqs.into_iter()
                                    .filter(|req| *req != idx)
                                    .map(|req| format!("n{req}")),
                            )
                        })
                        .collect(),
                )
            },
        )
    })
}

fn arb_status() -> impl Strategy<Value = ProgressStatus> {
    prop::sample::select(vec![
        ProgressStatus::Locked,
        ProgressStatus::InProgress,
        ProgressStatus::Completed,
        ProgressStatus::Mastered,
    ])
}

proptest! {
    #[test]
    fn focus_branch_stays_inside_graph(graph in arb_graph(), pick in 0usize..12) {
        let id = format!("n{}", pick % graph.len());
        let branch = compute_focus_branch(&id, &graph);
        prop_assert!(branch.contains(&id));
        for member in &branch {
            prop_assert!(graph.contains(member));
        }
    }

    #[test]
    fn focus_branch_is_closed_under_prerequisites(graph in arb_graph(), pick in 0usize..12) {
        let id = format!("n{}", pick % graph.len());
        let branch = compute_focus_branch(&id, &graph);
        let dependents: HashSet<String> =
            graph.dependents_of(&id).map(|skill| skill.id.clone()).collect();
        for member in &branch {
            if dependents.contains(member) && member != &id {
                continue;
            }
            let skill = graph.get(member).unwrap();
            for req in skill.requires.iter().filter(|req| graph.contains(req)) {
                prop_assert!(branch.contains(req), "{} missing prerequisite {}", member, req);
            }
        }
    }

    #[test]
    fn unlock_requires_every_prerequisite(
        graph in arb_graph(),
        statuses in prop::collection::vec(arb_status(), 14)
    ) {
        let lookup = |id: &str| -> ProgressStatus {
            id.trim_start_matches('n')
                .parse::<usize>()
                .ok()
                .and_then(|idx| statuses.get(idx).copied())
                .unwrap_or_default()
        };
        for skill in graph.skills() {
            let expected = skill
                .requires
                .iter()
                .all(|req| lookup(req).is_satisfied());
            prop_assert_eq!(
                is_unlocked(&skill.id, &graph, Some(&lookup as &dyn StatusLookup)),
                expected
            );
        }
    }
}
