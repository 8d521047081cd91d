use proptest::prelude::*;

use skilltree::core::{ProgressStatus, Skill, SkillGraph, SkillTree};
use skilltree::storage::{ProgressBook, ProgressEntry, ProgressFile};

fn graph() -> SkillGraph {
    SkillGraph::new(
        (0..6)
            .map(|i| {
                let skill = Skill::new(format!("n{i}"), "s").with_steps(3);
                if i == 0 {
                    skill
                } else {
                    skill.with_requires([format!("n{}", i - 1)])
                }
            })
            .collect(),
    )
}

fn arb_entry() -> impl Strategy<Value = (String, ProgressEntry)> {
    (
        0usize..8,
        prop::sample::select(vec![
            ProgressStatus::Locked,
            ProgressStatus::InProgress,
            ProgressStatus::Completed,
            ProgressStatus::Mastered,
        ]),
        -1i32..5,
        "[a-z ]{0,8}",
    )
        .prop_map(|(idx, status, current_step, note)| {
            (
                format!("n{idx}"),
                ProgressEntry {
                    status,
                    current_step,
                    note,
                },
            )
        })
}

fn file_of(entries: &[(String, ProgressEntry)]) -> ProgressFile {
    let mut file = ProgressFile::default();
    for (id, entry) in entries {
        file.skills.insert(id.clone(), entry.clone());
    }
    file
}

proptest! {
    #[test]
    fn import_is_idempotent(entries in prop::collection::vec(arb_entry(), 0..10)) {
        let file = file_of(&entries);
        let mut tree = SkillTree::new(graph(), ProgressBook::new());
        tree.import(&file);
        let once = tree.export().skills;
        prop_assert!(tree.import(&file).is_empty());
        prop_assert_eq!(tree.export().skills, once);
    }

    #[test]
    fn import_order_does_not_matter(entries in prop::collection::vec(arb_entry(), 0..10)) {
        let file = file_of(&entries);

        let mut batch = SkillTree::new(graph(), ProgressBook::new());
        batch.import(&file);

        let mut single = SkillTree::new(graph(), ProgressBook::new());
        for (id, entry) in file.skills.iter().rev() {
            let mut one = ProgressFile::default();
            one.skills.insert(id.clone(), entry.clone());
            single.import(&one);
        }

        prop_assert_eq!(batch.export().skills, single.export().skills);
        prop_assert_eq!(batch.edge_variants(), single.edge_variants());
    }

    #[test]
    fn step_rules_follow_status(status_idx in 0usize..4, steps in 0usize..6, start in -1i32..6) {
        let status = [
            ProgressStatus::Locked,
            ProgressStatus::InProgress,
            ProgressStatus::Completed,
            ProgressStatus::Mastered,
        ][status_idx];
        let mut book = ProgressBook::new();
        book.set_step("x", start);
        book.set_note("x", "keep");
        let record = book.set_status("x", status, steps).clone();
        let expected = match status {
            ProgressStatus::Locked => 0,
            ProgressStatus::InProgress => start,
            ProgressStatus::Completed | ProgressStatus::Mastered => i32::try_from(steps).unwrap(),
        };
        prop_assert_eq!(record.current_step, expected);
        prop_assert_eq!(record.note, "keep");
    }
}
