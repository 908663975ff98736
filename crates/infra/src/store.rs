//! The inventory store: the single authoritative item collection.
//!
//! - In-memory `Vec<Item>` behind a mutex, insertion ordered
//! - Every mutation persists the whole list under [`ITEMS_KEY`], then reads
//!   it back (round-trip verification)
//! - Persistence failures are logged and signalled, never returned; memory
//!   stays the source of truth until the next successful save

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value as JsonValue;
use tracing::{debug, error, info, warn};

use pantry_core::{DomainResult, ItemId};
use pantry_events::{EventBus, Signal};
use pantry_inventory::{Disposition, EntryForm, ExpiryContext, InventoryView, Item};

use crate::kv::KeyValueStore;

/// Key under which the whole item collection is persisted.
pub const ITEMS_KEY: &str = "items";

/// Whether a mutation reached durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    /// In-memory state changed, storage still holds the previous collection.
    Failed,
}

impl SaveStatus {
    pub fn is_saved(self) -> bool {
        self == SaveStatus::Saved
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardOutcome {
    Removed { item: Item, save: SaveStatus },
    /// Nothing was removed; ask the user with `prompt` and retry confirmed.
    NeedsConfirmation { prompt: &'static str },
    NotFound,
}

#[derive(Debug)]
pub struct InventoryStore<S, B>
where
    S: KeyValueStore,
    B: EventBus<Signal>,
{
    storage: S,
    signals: B,
    items: Mutex<Vec<Item>>,
}

impl<S, B> InventoryStore<S, B>
where
    S: KeyValueStore,
    B: EventBus<Signal>,
{
    /// Create an empty store without touching storage. Call [`Self::load`].
    pub fn new(storage: S, signals: B) -> Self {
        Self {
            storage,
            signals,
            items: Mutex::new(Vec::new()),
        }
    }

    /// Create a store and load the persisted collection.
    pub fn open(storage: S, signals: B) -> Self {
        let store = Self::new(storage, signals);
        store.load();
        store
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Item>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the in-memory collection with what storage holds.
    ///
    /// Absent entry: start empty and persist the empty list. Unreadable entry:
    /// start empty, log, leave storage alone.
    pub fn load(&self) {
        let mut items = self.lock();
        match self.read_items() {
            Ok(Some(stored)) => {
                info!(count = stored.len(), "inventory loaded");
                *items = stored;
            }
            Ok(None) => {
                items.clear();
                info!("no persisted inventory; initializing empty collection");
                if let Err(err) = self.storage.set(ITEMS_KEY, JsonValue::Array(Vec::new())) {
                    error!(error = %err, "failed to persist empty inventory");
                }
            }
            Err(err) => {
                items.clear();
                error!(error = %err, "unable to read persisted inventory; starting empty");
            }
        }
    }

    fn read_items(&self) -> anyhow::Result<Option<Vec<Item>>> {
        let Some(value) = self.storage.get(ITEMS_KEY)? else {
            return Ok(None);
        };
        let stored: Vec<Item> = serde_json::from_value(value)?;
        let count = stored.len();
        let unique = dedupe_by_id(stored);
        if unique.len() != count {
            warn!(dropped = count - unique.len(), "duplicate item ids in storage; keeping the last of each");
        }
        Ok(Some(unique))
    }

    /// Persist `items` and read them back. Caller holds the lock.
    fn persist(&self, items: &mut Vec<Item>) -> SaveStatus {
        let value = match serde_json::to_value(&*items) {
            Ok(value) => value,
            Err(err) => {
                error!(error = %err, "unable to serialize inventory");
                self.signal(Signal::Failure);
                return SaveStatus::Failed;
            }
        };

        if let Err(err) = self.storage.set(ITEMS_KEY, value) {
            error!(error = %err, "unable to save inventory");
            self.signal(Signal::Failure);
            return SaveStatus::Failed;
        }

        self.signal(Signal::Success);

        match self.read_items() {
            Ok(Some(stored)) => {
                if stored != *items {
                    warn!(
                        expected = items.len(),
                        found = stored.len(),
                        "inventory round-trip mismatch; adopting stored copy"
                    );
                }
                *items = stored;
            }
            Ok(None) => warn!("inventory missing right after save"),
            Err(err) => warn!(error = %err, "inventory round-trip read failed"),
        }

        SaveStatus::Saved
    }

    /// Publish a feedback cue. Delivery failures are logged only.
    pub fn signal(&self, signal: Signal) {
        if let Err(err) = self.signals.publish(signal) {
            warn!(%signal, error = ?err, "failed to publish signal");
        }
    }

    /// Append `item` and persist.
    ///
    /// An item whose id is already present replaces the old entry, which keeps
    /// ids unique; the item still lands at the end.
    pub fn add(&self, item: Item) -> SaveStatus {
        let mut items = self.lock();
        let id = item.id();
        let before = items.len();
        items.retain(|i| i.id() != id);
        if items.len() != before {
            debug!(%id, "add replaced existing item");
        }
        info!(%id, name = item.name(), "adding item");
        items.push(item);
        self.persist(&mut items)
    }

    /// Remove by id and persist. An absent id touches neither storage nor
    /// the signal bus.
    pub fn remove(&self, id: ItemId) -> SaveStatus {
        let mut items = self.lock();
        let before = items.len();
        items.retain(|i| i.id() != id);
        if items.len() == before {
            debug!(%id, "remove: item not present");
            return SaveStatus::Saved;
        }
        info!(%id, "item removed");
        self.persist(&mut items)
    }

    /// Re-submit an item: the old entry with the same id is dropped and the
    /// new one appended, so an updated item moves to the end.
    pub fn update(&self, item: Item) -> SaveStatus {
        self.add(item)
    }

    /// Submit an entry form: update when it was seeded from an existing
    /// item, add otherwise.
    pub fn save_entry(&self, form: EntryForm) -> DomainResult<(Item, SaveStatus)> {
        let updating = form.is_update();
        let item = form.submit()?;
        let status = if updating {
            self.update(item.clone())
        } else {
            self.add(item.clone())
        };
        Ok((item, status))
    }

    /// Throw an item away, honoring the confirmation rule.
    pub fn discard(&self, id: ItemId, confirmed: bool, ctx: &ExpiryContext) -> DiscardOutcome {
        let mut items = self.lock();
        let Some(pos) = items.iter().position(|i| i.id() == id) else {
            return DiscardOutcome::NotFound;
        };

        let disposition = items[pos].disposition(ctx);
        if !disposition.allows(confirmed) {
            return DiscardOutcome::NeedsConfirmation {
                prompt: disposition.prompt().unwrap_or_default(),
            };
        }

        let item = items.remove(pos);
        info!(%id, name = item.name(), immediate = disposition == Disposition::Immediate, "item discarded");
        let save = self.persist(&mut items);
        DiscardOutcome::Removed { item, save }
    }

    /// Snapshot of the whole collection in insertion order.
    pub fn items(&self) -> Vec<Item> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn find_by_code(&self, code: &str) -> Option<Item> {
        self.lock().find_by_code(code).cloned()
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<Item> {
        self.lock().find_by_id(id).cloned()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Item> {
        self.lock().find_by_name(name).cloned()
    }

    pub fn expired(&self, ctx: &ExpiryContext) -> Vec<Item> {
        self.lock().expired(ctx).into_iter().cloned().collect()
    }

    pub fn expiring_soon(&self, ctx: &ExpiryContext) -> Vec<Item> {
        self.lock().expiring_soon(ctx).into_iter().cloned().collect()
    }

    pub fn edible(&self, ctx: &ExpiryContext) -> Vec<Item> {
        self.lock().edible(ctx).into_iter().cloned().collect()
    }

    pub fn has_expired(&self, ctx: &ExpiryContext) -> bool {
        self.lock().has_expired(ctx)
    }

    pub fn has_expiring_soon(&self, ctx: &ExpiryContext) -> bool {
        self.lock().has_expiring_soon(ctx)
    }

    pub fn has_edible(&self, ctx: &ExpiryContext) -> bool {
        self.lock().has_edible(ctx)
    }
}

/// Keep the last item for each id, in the order those survivors appear.
fn dedupe_by_id(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Item> = items
        .into_iter()
        .rev()
        .filter(|item| seen.insert(item.id()))
        .collect();
    unique.reverse();
    unique
}
