//! Per-invocation wiring: config, storage, store, preferences, signals.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use tracing::debug;

use pantry_events::{EventBus, InMemoryEventBus, Signal, Subscription};
use pantry_infra::{InventoryStore, JsonFileKeyValueStore, PantryConfig, PreferenceStore, Preferences};
use pantry_inventory::{Clock, ExpiryContext, SystemClock};

use crate::output::Output;

pub type Store = InventoryStore<Arc<JsonFileKeyValueStore>, Arc<InMemoryEventBus<Signal>>>;

pub struct Context {
    pub store: Arc<Store>,
    pub prefs: PreferenceStore<Arc<JsonFileKeyValueStore>>,
    pub clock: Arc<dyn Clock>,
    pub output: Output,
    signals: Subscription<Signal>,
}

impl Context {
    pub fn load(data_dir: Option<PathBuf>, json: bool) -> Result<Self> {
        let config = match data_dir {
            Some(dir) => PantryConfig::with_data_dir(dir),
            None => PantryConfig::from_env()?,
        };
        debug!(path = %config.store_path().display(), "opening pantry store");

        let storage = Arc::new(
            JsonFileKeyValueStore::open(config.store_path())
                .with_context(|| format!("failed to open store at {:?}", config.store_path()))?,
        );
        let bus = Arc::new(InMemoryEventBus::<Signal>::new());
        let signals = bus.subscribe();

        Ok(Self {
            store: Arc::new(InventoryStore::open(storage.clone(), bus)),
            prefs: PreferenceStore::new(storage),
            clock: Arc::new(SystemClock),
            output: Output::new(json),
            signals,
        })
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs.load()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn expiry(&self) -> ExpiryContext {
        self.preferences().expiry_context(self.clock.as_ref())
    }

    /// Render queued feedback cues.
    pub fn flush_signals(&self) {
        for signal in self.signals.drain() {
            self.output.signal(signal);
        }
    }
}
