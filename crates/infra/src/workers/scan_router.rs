use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, warn};

use pantry_events::{Event, EventBus, Signal, Subscription};
use pantry_inventory::{Clock, EntryForm, EntryIntent, Item, ScanEvent};

use crate::kv::KeyValueStore;
use crate::store::InventoryStore;

/// Handle to control and join a background worker.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    /// Request graceful shutdown and wait for the worker to stop.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

/// Turns detection events into pre-filled entry forms.
///
/// - Subscribes to the scan bus
/// - Looks the scan up against a snapshot of the store
/// - Signals `Impact` and presents a form, or signals `Failure`
#[derive(Debug)]
pub struct ScanRouter;

impl ScanRouter {
    /// Form to present for `event`, or `None` when the scan is unusable
    /// (empty barcode, unrecognized object, no valid default expiry).
    pub fn route(event: &ScanEvent, items: &[Item], today: NaiveDate) -> Option<EntryForm> {
        let intent = match event {
            ScanEvent::BarcodeDetected { code, .. } if !code.trim().is_empty() => {
                EntryIntent::Barcode(code.clone())
            }
            ScanEvent::BarcodeDetected { .. } => return None,
            ScanEvent::ObjectDetected {
                produce: Some(produce),
                ..
            } => EntryIntent::Produce(*produce),
            ScanEvent::ObjectDetected { produce: None, .. } => return None,
        };
        match EntryForm::prefill(intent, items, today) {
            Ok(form) => Some(form),
            Err(err) => {
                warn!(error = %err, %today, "unable to seed entry form");
                None
            }
        }
    }

    /// Spawn a worker thread routing scans from `scans` to `present`.
    pub fn spawn<S, B, SB, P>(
        name: &'static str,
        scans: &SB,
        store: Arc<InventoryStore<S, B>>,
        clock: Arc<dyn Clock>,
        mut present: P,
    ) -> std::io::Result<WorkerHandle>
    where
        S: KeyValueStore + 'static,
        B: EventBus<Signal> + 'static,
        SB: EventBus<ScanEvent>,
        P: FnMut(EntryForm) + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let sub: Subscription<ScanEvent> = scans.subscribe();

        let join = thread::Builder::new().name(name.to_string()).spawn(move || {
            worker_loop(name, sub, shutdown_rx, |event| {
                let items = store.items();
                match Self::route(&event, &items, clock.today()) {
                    Some(form) => {
                        debug!(
                            worker = name,
                            event_type = event.event_type(),
                            detected_at = %event.occurred_at(),
                            title = form.intent.title(),
                            "presenting entry form"
                        );
                        store.signal(Signal::Impact);
                        present(form);
                    }
                    None => {
                        warn!(
                            worker = name,
                            event_type = event.event_type(),
                            detected_at = %event.occurred_at(),
                            "scan produced nothing usable"
                        );
                        store.signal(Signal::Failure);
                    }
                }
            })
        })?;

        Ok(WorkerHandle {
            shutdown: shutdown_tx,
            join: Some(join),
        })
    }
}

fn worker_loop<H>(
    name: &'static str,
    sub: Subscription<ScanEvent>,
    shutdown_rx: mpsc::Receiver<()>,
    mut handler: H,
) where
    H: FnMut(ScanEvent),
{
    let tick = Duration::from_millis(250);

    loop {
        // Shutdown check (non-blocking)
        if shutdown_rx.try_recv().is_ok() {
            break;
        }

        match sub.recv_timeout(tick) {
            Ok(event) => handler(event),
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                debug!(worker = name, "scan bus closed");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::InMemoryKeyValueStore;
    use pantry_events::InMemoryEventBus;
    use pantry_inventory::{Category, FixedClock, Produce};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 16).unwrap()
    }

    #[test]
    fn route_barcode_and_produce() {
        let items = vec![
            Item::new("Peanut Butter", Category::Condiment, today())
                .unwrap()
                .with_code("051500255162"),
        ];

        let form = ScanRouter::route(&ScanEvent::barcode("051500255162"), &items, today()).unwrap();
        assert_eq!(form.name, "Peanut Butter");
        assert!(form.is_update());

        let form = ScanRouter::route(&ScanEvent::object(Some(Produce::Banana)), &items, today()).unwrap();
        assert_eq!(form.name, "Bananas");
        assert_eq!(form.intent.title(), "Add Produce");
    }

    #[test]
    fn route_rejects_unusable_scans() {
        assert!(ScanRouter::route(&ScanEvent::barcode("  "), &[], today()).is_none());
        assert!(ScanRouter::route(&ScanEvent::object(None), &[], today()).is_none());
        assert!(ScanRouter::route(&ScanEvent::barcode("0001"), &[], NaiveDate::MAX).is_none());
    }

    #[test]
    fn worker_presents_forms_and_signals() {
        let signal_bus = Arc::new(InMemoryEventBus::<Signal>::new());
        let signals = signal_bus.subscribe();
        let store = Arc::new(InventoryStore::open(
            Arc::new(InMemoryKeyValueStore::new()),
            signal_bus,
        ));
        let scans = InMemoryEventBus::<ScanEvent>::new();
        let (form_tx, form_rx) = mpsc::channel();

        let handle = ScanRouter::spawn(
            "scan-router-test",
            &scans,
            store,
            Arc::new(FixedClock(today())),
            move |form| {
                let _ = form_tx.send(form);
            },
        )
        .unwrap();

        scans.publish(ScanEvent::object_label("mystery")).unwrap();
        scans.publish(ScanEvent::barcode("0001")).unwrap();

        let form = form_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(form.code, "0001");
        assert_eq!(form.intent, EntryIntent::Barcode("0001".into()));

        handle.shutdown();
        assert_eq!(signals.drain(), vec![Signal::Failure, Signal::Impact]);
    }
}
