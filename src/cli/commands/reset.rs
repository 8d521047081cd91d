//! skilltree reset - Reset a skill's progress

use clap::Args;
use tracing::info;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Skill ID
    pub skill: String,
}

pub fn run(ctx: &AppContext, args: &ResetArgs) -> Result<()> {
    let mut tree = ctx.load_tree()?;
    let change =
        super::status::track_change(&mut tree, &args.skill, |tree| tree.reset(&args.skill))?;
    let existed = ctx.db.reset_progress(&ctx.user, &args.skill)?;
    info!(target: "progress", skill = %args.skill, existed, "progress reset");
    super::status::emit_change(ctx, &change)
}
