use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use super::{KeyValueStore, KvError};

/// Key-value store kept as a single JSON object on disk.
///
/// Every write rewrites the whole file through a temp file + rename, so a
/// crash mid-write leaves the previous contents in place.
#[derive(Debug)]
pub struct JsonFileKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileKeyValueStore {
    /// Open (or lazily create) the store at `path`, creating parent directories.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, KvError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, JsonValue>, KvError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|e| KvError::Deserialize {
            key: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Like `read_map`, but an unreadable file is replaced rather than fatal.
    fn read_map_for_write(&self) -> Result<Map<String, JsonValue>, KvError> {
        match self.read_map() {
            Err(KvError::Deserialize { message, .. }) => {
                warn!(path = %self.path.display(), error = %message, "discarding unreadable store file");
                Ok(Map::new())
            }
            other => other,
        }
    }

    fn write_map(&self, map: &Map<String, JsonValue>) -> Result<(), KvError> {
        let bytes = serde_json::to_vec_pretty(map).map_err(|e| KvError::Serialize {
            key: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Map<String, JsonValue>)) -> Result<(), KvError> {
        let _guard = self.write_lock.lock().map_err(|_| KvError::Poisoned)?;
        let mut map = self.read_map_for_write()?;
        f(&mut map);
        self.write_map(&map)
    }
}

impl KeyValueStore for JsonFileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, KvError> {
        let mut map = self.read_map()?;
        Ok(map.remove(key))
    }

    fn set(&self, key: &str, value: JsonValue) -> Result<(), KvError> {
        self.modify(|map| {
            map.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        self.modify(|map| {
            map.remove(key);
        })
    }
}
