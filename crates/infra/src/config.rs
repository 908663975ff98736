//! Configuration loading and representation.

use std::path::PathBuf;

use anyhow::Context;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PANTRY_DATA_DIR";

/// File holding the key-value store inside the data directory.
pub const STORE_FILE_NAME: &str = "pantry.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantryConfig {
    pub data_dir: PathBuf,
}

impl PantryConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `PANTRY_DATA_DIR` if set, else the OS data directory.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Ok(Self::with_data_dir(dir)),
            _ => Ok(Self::with_data_dir(default_data_dir()?)),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    Ok(base.join("pantry"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_lives_in_data_dir() {
        let config = PantryConfig::with_data_dir("/tmp/pantry-test");
        assert_eq!(config.store_path(), PathBuf::from("/tmp/pantry-test/pantry.json"));
    }
}
