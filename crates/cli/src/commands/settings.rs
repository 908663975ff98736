//! Show or change preferences.

use anyhow::Result;

use super::SettingsArgs;
use crate::context::Context;

/// Run the settings command.
pub fn run(args: SettingsArgs, ctx: &Context) -> Result<()> {
    if let Some(days) = args.expiration_days {
        let window = ctx.prefs.set_expiration_days(days)?;
        ctx.output.success(&format!("Items now count as expiring soon {} days ahead", window.days()));
    }

    let prefs = ctx.preferences();
    if ctx.output.is_json() {
        ctx.output.json(&prefs);
        return Ok(());
    }

    ctx.output.header("Settings");
    ctx.output.kv("onboarded", if prefs.did_onboard { "yes" } else { "no" });
    ctx.output.kv("expiration alert", &format!("{} days", prefs.expiration_window.days()));
    Ok(())
}

/// Mark onboarding as complete.
pub fn onboard(ctx: &Context) -> Result<()> {
    if ctx.preferences().did_onboard {
        ctx.output.info("Already onboarded.");
        return Ok(());
    }
    ctx.prefs.complete_onboarding()?;
    ctx.output.success("Welcome to your pantry. Scan or add your first item to get started.");
    Ok(())
}
