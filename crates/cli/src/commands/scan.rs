//! Feed a detection through the scan pipeline.

use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use tracing::info;

use pantry_events::{Event, EventBus, InMemoryEventBus};
use pantry_infra::ScanRouter;
use pantry_inventory::ScanEvent;

use super::{ScanArgs, ScanCommand, save_form};
use crate::context::Context;

const FORM_TIMEOUT: Duration = Duration::from_secs(1);

/// Run the scan command.
pub fn run(args: ScanArgs, ctx: &Context) -> Result<()> {
    let event = match &args.command {
        ScanCommand::Barcode { code } => ScanEvent::barcode(code.trim()),
        ScanCommand::Object { label } => ScanEvent::object_label(label),
    };

    let scans = InMemoryEventBus::<ScanEvent>::new();
    let (form_tx, form_rx) = mpsc::channel();
    let router = ScanRouter::spawn("scan-router", &scans, ctx.store.clone(), ctx.clock.clone(), move |form| {
        let _ = form_tx.send(form);
    })
    .context("failed to start scan router")?;

    info!(event_type = event.event_type(), "scan received");
    scans.publish(event).context("failed to publish scan")?;
    let routed = form_rx.recv_timeout(FORM_TIMEOUT);
    router.shutdown();

    let Ok(mut form) = routed else {
        bail!("Scan not recognised. Barcodes must not be empty; objects must be a known produce label.");
    };

    args.fields.apply(&mut form, ctx.today())?;
    if !args.save {
        ctx.output.form(&form);
        ctx.output.info(&format!("Re-run with --save to {}.", form.submit_label().to_lowercase()));
        return Ok(());
    }
    save_form(form, ctx)
}
