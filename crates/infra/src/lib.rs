//! Infrastructure layer: storage backends, the inventory store, preferences,
//! background workers, configuration.

pub mod config;
pub mod kv;
pub mod preferences;
pub mod store;
pub mod workers;


pub use config::PantryConfig;
pub use kv::{InMemoryKeyValueStore, JsonFileKeyValueStore, KeyValueStore, KeyValueStoreExt, KvError};
pub use preferences::{PreferenceError, PreferenceStore, Preferences};
pub use store::{DiscardOutcome, InventoryStore, SaveStatus};
pub use workers::{ScanRouter, WorkerHandle};
