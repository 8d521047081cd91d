use std::collections::HashMap;

use skilltree::core::{
    NodeStatus, ProgressStatus, Skill, SkillGraph, StatusLookup, compute_focus_branch,
    display_status, is_unlocked,
};

fn ladder() -> SkillGraph {
    SkillGraph::new(vec![
        Skill::new("hang", "cal"),
        Skill::new("row", "cal"),
        Skill::new("pull", "cal").with_requires(["hang", "row"]),
        Skill::new("muscle", "cal").with_requires(["pull"]),
        Skill::new("lever", "cal").with_requires(["pull"]),
        Skill::new("orphan", "cal").with_requires(["ghost"]),
    ])
}

fn statuses(pairs: &[(&str, ProgressStatus)]) -> HashMap<String, ProgressStatus> {
    pairs
        .iter()
        .map(|(id, status)| ((*id).to_string(), *status))
        .collect()
}

#[test]
fn all_prerequisites_must_be_satisfied() {
    let graph = ladder();
    let partial = statuses(&[("hang", ProgressStatus::Mastered)]);
    assert!(!is_unlocked("pull", &graph, Some(&partial as &dyn StatusLookup)));

    let full = statuses(&[
        ("hang", ProgressStatus::Mastered),
        ("row", ProgressStatus::Completed),
    ]);
    assert!(is_unlocked("pull", &graph, Some(&full as &dyn StatusLookup)));
}

#[test]
fn in_progress_prerequisite_is_not_enough() {
    let graph = ladder();
    let lookup = statuses(&[
        ("hang", ProgressStatus::Completed),
        ("row", ProgressStatus::InProgress),
    ]);
    assert!(!is_unlocked("pull", &graph, Some(&lookup as &dyn StatusLookup)));
}

#[test]
fn missing_lookup_and_unknown_ids_fail_closed() {
    let graph = ladder();
    assert!(!is_unlocked("hang", &graph, None));
    let lookup = |_: &str| ProgressStatus::Mastered;
    assert!(!is_unlocked("nope", &graph, Some(&lookup as &dyn StatusLookup)));
    assert_eq!(display_status("hang", &graph, None), NodeStatus::Locked);
}

#[test]
fn dangling_prerequisite_keeps_skill_locked() {
    let graph = ladder();
    let lookup = |_: &str| ProgressStatus::Locked;
    assert_eq!(
        display_status("orphan", &graph, Some(&lookup as &dyn StatusLookup)),
        NodeStatus::Locked
    );
}

#[test]
fn stored_progress_wins_over_unlock() {
    let graph = ladder();
    let lookup = statuses(&[("muscle", ProgressStatus::InProgress)]);
    assert_eq!(
        display_status("muscle", &graph, Some(&lookup as &dyn StatusLookup)),
        NodeStatus::InProgress
    );
    assert_eq!(
        display_status("hang", &graph, Some(&lookup as &dyn StatusLookup)),
        NodeStatus::Unlocked
    );
}

#[test]
fn focus_branch_has_ancestors_and_direct_dependents() {
    let graph = ladder();
    let branch = compute_focus_branch("pull", &graph);
    let mut ids: Vec<&str> = branch.iter().map(String::as_str).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["hang", "lever", "muscle", "pull", "row"]);

    let branch = compute_focus_branch("hang", &graph);
    assert!(branch.contains("pull"));
    assert!(!branch.contains("muscle"));
}

#[test]
fn focus_branch_survives_cycles() {
    let graph = SkillGraph::new(vec![
        Skill::new("a", "s").with_requires(["b"]),
        Skill::new("b", "s").with_requires(["a"]),
    ]);
    let branch = compute_focus_branch("a", &graph);
    assert_eq!(branch.len(), 2);
    assert!(compute_focus_branch("zzz", &graph).is_empty());
}

#[test]
fn validate_reports_structural_problems() {
    let graph = SkillGraph::new(vec![
        Skill::new("a", "s").with_requires(["b"]),
        Skill::new("b", "s").with_requires(["a"]),
        Skill::new("c", "s").with_requires(["c", "ghost"]),
        Skill::new("a", "s"),
    ]);
    let report = graph.validate();
    assert_eq!(report.duplicate_ids, vec!["a".to_string()]);
    assert_eq!(report.self_loops, vec!["c".to_string()]);
    assert_eq!(report.dangling.len(), 1);
    assert_eq!(report.dangling[0].missing, "ghost");
    assert_eq!(report.cycles, vec![vec!["a".to_string(), "b".to_string()]]);
    assert!(report.has_errors());
}
