//! skilltree note - Attach a note to a skill

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct NoteArgs {
    /// Skill ID
    pub skill: String,

    /// Note text; an empty string clears the note
    pub text: String,
}

pub fn run(ctx: &AppContext, args: &NoteArgs) -> Result<()> {
    let mut tree = ctx.load_tree()?;
    let change = super::status::track_change(&mut tree, &args.skill, |tree| {
        tree.set_note(&args.skill, &args.text)
    })?;
    ctx.db.save_progress(&ctx.user, &args.skill, &change.record)?;
    super::status::emit_change(ctx, &change)
}
