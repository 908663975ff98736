//! Change an existing item.

use anyhow::{Context as _, Result};

use pantry_core::DomainError;
use pantry_inventory::{EntryForm, EntryIntent};

use super::{EditArgs, save_form};
use crate::context::Context;

/// Run the edit command.
pub fn run(args: EditArgs, ctx: &Context) -> Result<()> {
    ctx.store
        .find_by_id(args.id)
        .ok_or_else(DomainError::not_found)
        .with_context(|| format!("no item with id {}", args.id))?;

    let today = ctx.today();
    let mut form = EntryForm::prefill(EntryIntent::Edit(args.id), &ctx.store.items(), today)?;
    args.fields.apply(&mut form, today)?;
    save_form(form, ctx)
}
