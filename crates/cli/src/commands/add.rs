//! Add an item by hand.

use anyhow::Result;

use pantry_inventory::{EntryForm, EntryIntent};

use super::{AddArgs, save_form};
use crate::context::Context;

/// Run the add command.
pub fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let today = ctx.today();
    let mut form = EntryForm::prefill(EntryIntent::Manual, &ctx.store.items(), today)?;
    args.fields.apply(&mut form, today)?;
    save_form(form, ctx)
}
