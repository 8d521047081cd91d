use std::collections::HashMap;
use std::path::Path;

use skilltree::config::Config;
use skilltree::core::ListSortBy;
use skilltree::test_utils::{TestCase, run_table_tests};

#[test]
fn view_sort_from_toml() -> Result<(), String> {
    let cases = vec![
        TestCase::new("absent", "", Some(ListSortBy::Default)),
        TestCase::new(
            "difficulty ascending",
            "[view]\ndefault_sort = \"difficulty-asc\"\n",
            Some(ListSortBy::DifficultyAsc),
        ),
        TestCase::new("progress", "[view]\ndefault_sort = \"progress\"\n", Some(ListSortBy::Progress)),
        TestCase::new("unknown value", "[view]\ndefault_sort = \"random\"\n", None),
        TestCase::new("not toml", "[view\n", None),
    ];

    run_table_tests(cases, |raw| Config::from_toml(raw).ok().map(|c| c.view.default_sort))
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_toml("[paths]\ndatabase = \"data/progress.db\"\n").unwrap();
    let root = Path::new("/srv/skilltree");
    assert_eq!(config.database_path(root), root.join("data/progress.db"));
    assert_eq!(config.catalog_dir(root), root.join("catalog"));
    assert_eq!(config.user.id, "local");
    assert!(!config.robot.enabled);
}

#[test]
fn env_sports_prepend_configured() {
    let mut config = Config::from_toml("[view]\nsports = [\"rings\", \"bars\"]\n").unwrap();
    let vars = HashMap::from([("SKILLTREE_VIEW_SPORTS", "bars,floor")]);
    config
        .apply_overrides(&|key: &str| vars.get(key).map(|v| (*v).to_string()))
        .unwrap();
    assert_eq!(config.view.sports, vec!["bars", "floor", "rings"]);
}

#[test]
fn explicit_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[user]\nid = \"project\"\n").unwrap();
    let config = Config::load(Some(dir.path().join("absent.toml").as_path()), dir.path()).unwrap();
    assert_eq!(config.user.id, "local");
}
