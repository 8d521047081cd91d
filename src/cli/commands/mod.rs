//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod edges;
pub mod focus;
pub mod list;
pub mod note;
pub mod progress;
pub mod reset;
pub mod seed;
pub mod show;
pub mod status;
pub mod step;
pub mod validate;

use crate::app::AppContext;
use crate::cli::colors::ColorSupport;
use crate::core::session::SkillTree;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Seed(args) => seed::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Status(args) => status::run(ctx, args),
        Commands::Step(args) => step::run(ctx, args),
        Commands::Note(args) => note::run(ctx, args),
        Commands::Reset(args) => reset::run(ctx, args),
        Commands::Focus(args) => focus::run(ctx, args),
        Commands::Edges(args) => edges::run(ctx, args),
        Commands::Validate(args) => validate::run(ctx, args),
        Commands::Progress(args) => progress::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a YAML catalog into the database
    Seed(seed::SeedArgs),

    /// List skills with filters and sorting
    List(list::ListArgs),

    /// Show one skill with its prerequisites and progress
    Show(show::ShowArgs),

    /// Set the progress status of a skill
    Status(status::StatusArgs),

    /// Advance or set the current progression step
    Step(step::StepArgs),

    /// Attach a note to a skill
    Note(note::NoteArgs),

    /// Reset a skill's progress
    Reset(reset::ResetArgs),

    /// Show the focus branch of a skill
    Focus(focus::FocusArgs),

    /// List prerequisite edges with their variants
    Edges(edges::EdgesArgs),

    /// Check the catalog graph for problems
    Validate(validate::ValidateArgs),

    /// Export or import progress files
    Progress(progress::ProgressArgs),
}

/// Colors only for human output on a capable terminal.
fn color_support(ctx: &AppContext) -> ColorSupport {
    if ctx.output_format.is_machine() {
        ColorSupport::None
    } else {
        ColorSupport::detect()
    }
}

/// Write the current records of `ids` for the context user.
fn persist<'a, I>(ctx: &AppContext, tree: &SkillTree, ids: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut saved = 0;
    for id in ids {
        ctx.db
            .save_progress(&ctx.user, id, &tree.progress().get_progress(id))?;
        saved += 1;
    }
    Ok(saved)
}
