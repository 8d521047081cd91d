use skilltree::SkillTreeError;
use skilltree::core::SkillType;
use skilltree::storage::catalog::{read_progress_file, write_progress_file};
use skilltree::storage::load_catalog;
use skilltree::test_utils::fixtures::CatalogFixture;

#[test]
fn wrapped_and_single_documents_load() {
    let fixture = CatalogFixture::empty();
    fixture.write(
        "rings/transitions.yaml",
        "skills:\n  - id: kip\n    name: Kip\n    type: transition\n  - id: bail\n    name: Bail\n",
    );
    fixture.write("rings/support.yml", "id: support\nname: Support Hold\nrequires: null\n");
    fixture.write("rings/notes.txt", "not yaml");

    let catalog = load_catalog(fixture.root()).unwrap();
    let ids: Vec<&str> = catalog.skills.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["support", "kip", "bail"]);
    assert!(catalog.skills.iter().all(|s| s.sport == "rings"));
    assert_eq!(catalog.skills[1].skill_type, SkillType::Transition);
    assert!(catalog.skills[0].requires.is_empty());
    assert!(catalog.categories.is_empty());
}

#[test]
fn duplicate_ids_are_rejected() {
    let fixture = CatalogFixture::calisthenics();
    fixture.write("extra/dupes.yaml", "- id: pull-up\n  name: Again\n");
    let err = load_catalog(fixture.root()).unwrap_err();
    assert!(matches!(err, SkillTreeError::InvalidSkill(msg) if msg.contains("pull-up")));
}

#[test]
fn self_loop_is_rejected() {
    let fixture = CatalogFixture::empty();
    fixture.write("s/loop.yaml", "id: ouroboros\nname: Loop\nrequires: [ouroboros]\n");
    assert!(load_catalog(fixture.root()).is_err());
}

#[test]
fn dangling_references_only_warn() {
    let fixture = CatalogFixture::empty();
    fixture.write("s/a.yaml", "id: a\nname: A\nrequires: [ghost]\n");
    let catalog = load_catalog(fixture.root()).unwrap();
    assert_eq!(catalog.skills.len(), 1);
}

#[test]
fn missing_directory_is_an_error() {
    let fixture = CatalogFixture::empty();
    let err = load_catalog(&fixture.root().join("nope")).unwrap_err();
    assert!(matches!(err, SkillTreeError::MissingConfig(_)));
}

#[test]
fn malformed_yaml_names_the_file() {
    let fixture = CatalogFixture::empty();
    fixture.write("s/broken.yaml", "- id: [unclosed\n");
    let err = load_catalog(fixture.root()).unwrap_err();
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn progress_file_round_trip_on_disk() {
    let fixture = CatalogFixture::empty();
    let path = fixture.root().join("out").join("progress.json");
    let mut file = skilltree::storage::ProgressFile::default();
    file.skills.insert(
        "kip".to_string(),
        skilltree::storage::ProgressEntry {
            status: skilltree::core::ProgressStatus::InProgress,
            current_step: 1,
            note: "hips".to_string(),
        },
    );
    write_progress_file(&path, &file).unwrap();
    assert_eq!(read_progress_file(&path).unwrap(), file);
}
