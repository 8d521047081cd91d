use std::collections::{BTreeSet, HashMap};

use skilltree::core::{
    ListSortBy, ProgressStatus, Skill, SkillFilters, SkillGraph, SkillQuery, SkillType,
    StatusFilter, StatusLookup, filtered_skills, progress_fill,
};

fn catalog() -> SkillGraph {
    SkillGraph::new(vec![
        Skill::new("plank", "core").with_category("static").with_difficulty(2),
        Skill::new("l-sit", "core")
            .with_category("static")
            .with_difficulty(4)
            .with_requires(["plank"]),
        Skill::new("kip", "bars").with_type(SkillType::Transition).with_difficulty(5),
        Skill::new("dip", "bars").with_difficulty(3).with_steps(4),
        Skill::new("loose", "bars").with_difficulty(1),
    ])
}

fn ids(skills: &[&Skill]) -> Vec<String> {
    skills.iter().map(|s| s.id.clone()).collect()
}

#[test]
fn empty_filters_keep_catalog_order() {
    let graph = catalog();
    let skills = filtered_skills(&graph, &SkillFilters::default(), None);
    assert_eq!(ids(&skills), vec!["plank", "l-sit", "kip", "dip", "loose"]);
}

#[test]
fn dimensions_are_anded_values_ored() {
    let graph = catalog();
    let filters = SkillFilters {
        sport: BTreeSet::from(["bars".to_string(), "core".to_string()]),
        skill_type: BTreeSet::from([SkillType::Skill]),
        ..SkillFilters::default()
    };
    let skills = filtered_skills(&graph, &filters, None);
    assert_eq!(ids(&skills), vec!["plank", "l-sit", "dip", "loose"]);
}

#[test]
fn category_filter_skips_uncategorised() {
    let graph = catalog();
    let filters = SkillFilters {
        category: BTreeSet::from(["static".to_string()]),
        ..SkillFilters::default()
    };
    assert_eq!(ids(&filtered_skills(&graph, &filters, None)), vec!["plank", "l-sit"]);
}

#[test]
fn unlocked_filter_is_derived() {
    let graph = catalog();
    let lookup: HashMap<String, ProgressStatus> =
        HashMap::from([("plank".to_string(), ProgressStatus::Completed)]);
    let filters = SkillFilters {
        status: BTreeSet::from([StatusFilter::Unlocked]),
        ..SkillFilters::default()
    };
    let skills = filtered_skills(&graph, &filters, Some(&lookup as &dyn StatusLookup));
    assert_eq!(ids(&skills), vec!["l-sit", "kip", "dip", "loose"]);

    let filters = SkillFilters {
        status: BTreeSet::from([StatusFilter::Stored(ProgressStatus::Completed)]),
        ..SkillFilters::default()
    };
    let skills = filtered_skills(&graph, &filters, Some(&lookup as &dyn StatusLookup));
    assert_eq!(ids(&skills), vec!["plank"]);
}

#[test]
fn difficulty_sort_is_stable() {
    let graph = SkillGraph::new(vec![
        Skill::new("a", "s").with_difficulty(3),
        Skill::new("b", "s").with_difficulty(1),
        Skill::new("c", "s").with_difficulty(3),
        Skill::new("d", "s").with_difficulty(1),
    ]);
    let asc = SkillQuery {
        sort: ListSortBy::DifficultyAsc,
        ..SkillQuery::default()
    };
    assert_eq!(ids(&asc.run(&graph, None)), vec!["b", "d", "a", "c"]);
    let desc = SkillQuery {
        sort: ListSortBy::DifficultyDesc,
        ..SkillQuery::default()
    };
    assert_eq!(ids(&desc.run(&graph, None)), vec!["a", "c", "b", "d"]);
}

#[test]
fn status_sort_puts_advanced_first() {
    let graph = catalog();
    let lookup: HashMap<String, ProgressStatus> = HashMap::from([
        ("dip".to_string(), ProgressStatus::Mastered),
        ("kip".to_string(), ProgressStatus::InProgress),
    ]);
    let query = SkillQuery {
        sort: ListSortBy::Status,
        ..SkillQuery::default()
    };
    let skills = query.run(&graph, Some(&lookup as &dyn StatusLookup));
    assert_eq!(ids(&skills), vec!["dip", "kip", "plank", "loose", "l-sit"]);
}

#[test]
fn progress_fill_handles_stepless_skills() {
    assert!((progress_fill(ProgressStatus::Completed, 0, 0) - 100.0).abs() < f64::EPSILON);
    assert!(progress_fill(ProgressStatus::InProgress, 0, 3).abs() < f64::EPSILON);
    assert!((progress_fill(ProgressStatus::InProgress, 4, 1) - 25.0).abs() < f64::EPSILON);
    assert!(progress_fill(ProgressStatus::InProgress, 4, -1).abs() < f64::EPSILON);
    assert!((progress_fill(ProgressStatus::InProgress, 4, 9) - 100.0).abs() < f64::EPSILON);
}

#[test]
fn sort_names_parse() {
    assert_eq!("difficulty_desc".parse::<ListSortBy>().unwrap(), ListSortBy::DifficultyDesc);
    assert!("sideways".parse::<ListSortBy>().is_err());
}
