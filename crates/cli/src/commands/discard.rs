//! Throw an item away.

use anyhow::{Context as _, Result, bail};
use dialoguer::Confirm;

use pantry_core::DomainError;
use pantry_infra::DiscardOutcome;

use super::DiscardArgs;
use crate::context::Context;

/// Run the discard command.
pub fn run(args: DiscardArgs, ctx: &Context) -> Result<()> {
    let expiry = ctx.expiry();

    let outcome = match ctx.store.discard(args.id, args.yes, &expiry) {
        DiscardOutcome::NeedsConfirmation { prompt } => {
            if ctx.output.is_json() {
                bail!("{prompt} Pass --yes to discard it anyway.");
            }
            let confirmed = Confirm::new()
                .with_prompt(format!("{prompt} Discard it?"))
                .default(false)
                .interact()?;
            if !confirmed {
                ctx.output.info("Kept.");
                return Ok(());
            }
            ctx.store.discard(args.id, true, &expiry)
        }
        outcome => outcome,
    };

    match outcome {
        DiscardOutcome::Removed { item, save } => {
            if save.is_saved() {
                ctx.output.success(&format!("Discarded {}", item.name()));
            }
            if ctx.output.is_json() {
                ctx.output.json(&item);
            }
            Ok(())
        }
        DiscardOutcome::NotFound => Err(DomainError::not_found())
            .with_context(|| format!("no item with id {}", args.id)),
        DiscardOutcome::NeedsConfirmation { prompt } => bail!("{prompt}"),
    }
}
