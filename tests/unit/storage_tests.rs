use skilltree::core::{Category, ProgressStatus, Skill};
use skilltree::storage::{Database, ProgressBook};

fn seeded() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.seed(
        &[Category {
            id: "pull".to_string(),
            name: "Pull".to_string(),
            color: "#3b82f6".to_string(),
            description: None,
        }],
        &[
            Skill::new("hang", "cal").with_category("pull"),
            Skill::new("pull-up", "cal").with_requires(["hang"]).with_steps(3),
        ],
    )
    .unwrap();
    db
}

#[test]
fn seed_is_repeatable() {
    let db = seeded();
    db.seed(&[], &[Skill::new("hang", "cal").with_difficulty(4)]).unwrap();
    assert_eq!(db.skill_count().unwrap(), 2);
    let skills = db.read_all().unwrap();
    assert_eq!(skills[0].id, "hang");
    assert_eq!(skills[0].difficulty, 4);
    assert_eq!(skills[1].requires, vec!["hang".to_string()]);
    assert_eq!(skills[1].total_steps(), 3);
    assert_eq!(db.read_categories().unwrap().len(), 1);
}

#[test]
fn save_book_and_reset() {
    let db = seeded();
    let mut book = ProgressBook::new();
    book.set_status("hang", ProgressStatus::Mastered, 0);
    book.set_note("pull-up", "bands");
    db.save_book("ana", &book).unwrap();

    let stored = db.read_progress("ana").unwrap();
    assert_eq!(stored.get_progress("hang").status, ProgressStatus::Mastered);
    assert!(stored.get_progress("hang").mastered_at.is_some());
    assert_eq!(stored.get_progress("pull-up").note, "bands");

    assert!(db.reset_progress("ana", "hang").unwrap());
    let reset = db.read_record("ana", "hang").unwrap().unwrap();
    assert_eq!(reset.status, ProgressStatus::Locked);
    assert!(reset.updated_at.is_some());
    // a reset row is still a row
    assert!(db.reset_progress("ana", "hang").unwrap());
    assert!(!db.reset_progress("ana", "ghost").unwrap());
    assert_eq!(db.read_record("ana", "ghost").unwrap().unwrap().current_step, 0);
    assert!(db.read_progress("ben").unwrap().is_empty());
}

#[test]
fn database_file_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("skilltree.db");
    let db = Database::open(&path).unwrap();
    assert!(path.is_file());
    assert!(db.schema_version() >= 1);
}
