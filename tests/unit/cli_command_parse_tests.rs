use clap::Parser;

use skilltree::cli::commands::progress::ProgressCommand;
use skilltree::cli::{Cli, Commands, OutputFormat};
use skilltree::core::{ListSortBy, ProgressStatus, SkillType, StatusFilter};

fn parse(args: &[&str]) -> Commands {
    let mut argv = vec!["skilltree"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv).command
}

#[test]
fn parse_list_filters() {
    match parse(&[
        "list",
        "--sport",
        "rings",
        "--sport",
        "bars",
        "--type",
        "transition",
        "--status",
        "unlocked",
        "--status",
        "in_progress",
        "--sort",
        "difficulty-desc",
    ]) {
        Commands::List(args) => {
            assert_eq!(args.sport, vec!["rings", "bars"]);
            assert_eq!(args.skill_type, vec![SkillType::Transition]);
            assert_eq!(
                args.status,
                vec![
                    StatusFilter::Unlocked,
                    StatusFilter::Stored(ProgressStatus::InProgress)
                ]
            );
            assert_eq!(args.sort, Some(ListSortBy::DifficultyDesc));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_status_values() {
    match parse(&["status", "kip", "mastered"]) {
        Commands::Status(args) => {
            assert_eq!(args.skill, "kip");
            assert_eq!(args.status, ProgressStatus::Mastered);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    let argv = ["skilltree", "status", "kip", "unlocked"];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn parse_step_set_negative() {
    match parse(&["step", "kip", "--set", "-1"]) {
        Commands::Step(args) => assert_eq!(args.set, Some(-1)),
        other => panic!("unexpected command: {other:?}"),
    }
    match parse(&["step", "kip"]) {
        Commands::Step(args) => assert!(args.set.is_none()),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_progress_subcommands() {
    match parse(&["progress", "export", "--out", "p.json"]) {
        Commands::Progress(args) => match args.command {
            ProgressCommand::Export { out } => {
                assert_eq!(out.as_deref(), Some(std::path::Path::new("p.json")));
            }
            ProgressCommand::Import { .. } => panic!("expected export"),
        },
        other => panic!("unexpected command: {other:?}"),
    }
    match parse(&["progress", "import", "p.json"]) {
        Commands::Progress(args) => {
            assert!(matches!(args.command, ProgressCommand::Import { .. }));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn edges_highlighted_only_needs_focus() {
    assert!(Cli::try_parse_from(["skilltree", "edges", "--highlighted-only"]).is_err());
    match parse(&["edges", "--focus", "kip", "--highlighted-only"]) {
        Commands::Edges(args) => {
            assert_eq!(args.focus.as_deref(), Some("kip"));
            assert!(args.highlighted_only);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::parse_from(["skilltree", "list", "--robot", "--user", "ana", "-vv"]);
    assert!(cli.robot);
    assert_eq!(cli.user.as_deref(), Some("ana"));
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.output_format(), OutputFormat::Json);
}
