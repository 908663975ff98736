//! Show the pantry.

use anyhow::Result;

use pantry_inventory::{InventoryView, Item};

use super::{ListArgs, View};
use crate::context::Context;

/// Run the list command.
pub fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    if !ctx.preferences().did_onboard {
        ctx.output.info("First time here? Run `pantry onboard` once you've had a look around.");
    }

    let expiry = ctx.expiry();
    let items = ctx.store.items();

    let selected: Vec<Item> = match args.view {
        View::Home => return home(&items, ctx),
        View::All => items,
        View::Expired => items.expired(&expiry).into_iter().cloned().collect(),
        View::Expiring => items.expiring_soon(&expiry).into_iter().cloned().collect(),
        View::Edible => items.edible(&expiry).into_iter().cloned().collect(),
        View::Low => items.low_on_stock(&expiry).into_iter().cloned().collect(),
        View::Out => items.out_of_stock(&expiry).into_iter().cloned().collect(),
    };

    if selected.is_empty() && !ctx.output.is_json() {
        ctx.output.info("Nothing here.");
        return Ok(());
    }
    ctx.output.items(&selected, &expiry);
    Ok(())
}

fn home(items: &[Item], ctx: &Context) -> Result<()> {
    let expiry = ctx.expiry();

    if ctx.output.is_json() {
        ctx.output.items(items, &expiry);
        return Ok(());
    }

    if items.is_empty() {
        ctx.output.info("Your pantry is empty. Add something with `pantry add` or `pantry scan`.");
        return Ok(());
    }

    if items.has_expiring_soon(&expiry) {
        ctx.output.header("Expiring Soon");
        let soon: Vec<Item> = items
            .expiring_soon(&expiry)
            .into_iter()
            .filter(|item| !item.is_expired(&expiry))
            .cloned()
            .collect();
        ctx.output.items(&soon, &expiry);
    }

    if items.has_expired(&expiry) {
        ctx.output.header("Expired");
        let expired: Vec<Item> = items.expired(&expiry).into_iter().cloned().collect();
        ctx.output.items(&expired, &expiry);
    }

    ctx.output.header("Pantry");
    ctx.output.items(items, &expiry);
    Ok(())
}
