//! skilltree step - Advance or set the current progression step

use clap::Args;
use tracing::info;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct StepArgs {
    /// Skill ID
    pub skill: String,

    /// Set the step instead of advancing by one
    #[arg(long, allow_negative_numbers = true)]
    pub set: Option<i32>,
}

pub fn run(ctx: &AppContext, args: &StepArgs) -> Result<()> {
    let mut tree = ctx.load_tree()?;
    let change = super::status::track_change(&mut tree, &args.skill, |tree| match args.set {
        Some(step) => tree.set_step(&args.skill, step),
        None => tree.advance_step(&args.skill),
    })?;
    ctx.db.save_progress(&ctx.user, &args.skill, &change.record)?;
    info!(target: "progress", skill = %args.skill, step = change.record.current_step, "step updated");
    super::status::emit_change(ctx, &change)
}
