//! Flat key-value storage.
//!
//! The pantry persists a handful of named entries (the item list and two
//! preferences) as JSON values. Backends only need to get, set and remove a
//! whole value under a key; there are no partial updates or transactions.

mod in_memory;
mod json_file;

pub use in_memory::InMemoryKeyValueStore;
pub use json_file::JsonFileKeyValueStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize value for key {key}: {message}")]
    Serialize { key: String, message: String },

    #[error("failed to deserialize value for key {key}: {message}")]
    Deserialize { key: String, message: String },

    #[error("storage lock poisoned")]
    Poisoned,
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, KvError>;
    fn set(&self, key: &str, value: JsonValue) -> Result<(), KvError>;
    fn remove(&self, key: &str) -> Result<(), KvError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<JsonValue>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: JsonValue) -> Result<(), KvError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        (**self).remove(key)
    }
}

/// Typed access on top of the raw JSON values.
pub trait KeyValueStoreExt: KeyValueStore {
    fn get_typed<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, KvError> {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| KvError::Deserialize {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn set_typed<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), KvError> {
        let value = serde_json::to_value(value).map_err(|e| KvError::Serialize {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
