use skilltree::core::{EdgeVariant, NodeStatus, ProgressStatus, Skill, SkillGraph, SkillTree};
use skilltree::storage::{ProgressBook, ProgressEntry, ProgressFile};
use skilltree::SkillTreeError;

fn tree() -> SkillTree {
    SkillTree::new(
        SkillGraph::new(vec![
            Skill::new("crow", "balance"),
            Skill::new("headstand", "balance"),
            Skill::new("handstand", "balance")
                .with_requires(["crow", "headstand"])
                .with_steps(3),
            Skill::new("press", "balance").with_requires(["handstand"]),
        ]),
        ProgressBook::new(),
    )
}

fn entry(status: ProgressStatus) -> ProgressEntry {
    ProgressEntry {
        status,
        current_step: 0,
        note: String::new(),
    }
}

#[test]
fn edges_track_status_changes() {
    let mut tree = tree();
    assert_eq!(tree.edge_variant("crow", "handstand"), Some(EdgeVariant::LockedSolid));

    tree.set_status("crow", ProgressStatus::Completed).unwrap();
    assert_eq!(tree.edge_variant("crow", "handstand"), Some(EdgeVariant::LockedSolid));

    tree.set_status("headstand", ProgressStatus::Mastered).unwrap();
    assert_eq!(tree.edge_variant("crow", "handstand"), Some(EdgeVariant::Available));
    assert_eq!(tree.edge_variant("headstand", "handstand"), Some(EdgeVariant::Available));
    assert_eq!(tree.edge_variant("handstand", "press"), Some(EdgeVariant::LockedSolid));

    tree.set_status("handstand", ProgressStatus::Completed).unwrap();
    assert_eq!(
        tree.edge_variant("headstand", "handstand"),
        Some(EdgeVariant::MasteredToCompleted)
    );
    assert_eq!(tree.edge_variant("press", "crow"), None);
}

#[test]
fn completing_fills_steps_and_reset_clears() {
    let mut tree = tree();
    let record = tree
        .set_status("handstand", ProgressStatus::Completed)
        .unwrap();
    assert_eq!(record.current_step, 3);
    assert!(record.started_at.is_some());

    let record = tree.reset("handstand").unwrap();
    assert_eq!(record.status, ProgressStatus::Locked);
    assert_eq!(record.current_step, 0);
    assert_eq!(tree.display_status("handstand"), NodeStatus::Locked);
}

#[test]
fn unknown_skill_is_rejected() {
    let mut tree = tree();
    let err = tree.set_status("planche", ProgressStatus::Mastered).unwrap_err();
    assert!(matches!(err, SkillTreeError::SkillNotFound(id) if id == "planche"));
    assert!(tree.focus("planche").is_err());
}

#[test]
fn import_is_idempotent_and_order_independent() {
    let mut file = ProgressFile::default();
    file.skills.insert("crow".to_string(), entry(ProgressStatus::Completed));
    file.skills.insert("headstand".to_string(), entry(ProgressStatus::Completed));
    file.skills.insert("unknown".to_string(), entry(ProgressStatus::Mastered));

    let mut first = tree();
    let changed = first.import(&file);
    assert_eq!(changed.len(), 3);
    assert!(first.import(&file).is_empty());

    let mut second = tree();
    for (id, value) in file.skills.iter().rev() {
        let mut single = ProgressFile::default();
        single.skills.insert(id.clone(), value.clone());
        second.import(&single);
    }

    for id in ["crow", "headstand", "handstand", "press"] {
        assert_eq!(first.display_status(id), second.display_status(id), "{id}");
    }
    assert_eq!(first.display_status("handstand"), NodeStatus::Unlocked);
    assert_eq!(
        first.edge_variant("crow", "handstand"),
        second.edge_variant("crow", "handstand")
    );
}

#[test]
fn export_round_trips_through_import() {
    let mut source = tree();
    source.set_status("crow", ProgressStatus::Mastered).unwrap();
    source.set_note("crow", "30s holds").unwrap();
    let file = source.export();

    let mut target = tree();
    target.import(&file);
    assert_eq!(target.progress().get_progress("crow").note, "30s holds");
    assert_eq!(target.display_status("crow"), NodeStatus::Mastered);
}

#[test]
fn focus_fades_outside_branch() {
    let mut tree = tree();
    let branch = tree.focus("crow").unwrap().clone();
    assert!(branch.contains("handstand"));
    assert!(!branch.contains("press"));
    assert!(tree.is_faded("press"));
    assert!(!tree.is_faded("crow"));

    let highlighted: Vec<_> = tree
        .edge_variants()
        .into_iter()
        .filter(|edge| edge.highlighted)
        .map(|edge| (edge.parent, edge.child))
        .collect();
    assert_eq!(highlighted, vec![("crow".to_string(), "handstand".to_string())]);

    tree.clear_focus();
    assert!(!tree.is_faded("press"));
}
