//! User preferences: onboarding flag and expiration alert window.
//!
//! Preferences are read into a plain [`Preferences`] value and handed to the
//! derived views explicitly; nothing reads them from ambient global state.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use pantry_core::DomainError;
use pantry_inventory::{Clock, ExpirationWindow, ExpiryContext};

use crate::kv::{KeyValueStore, KeyValueStoreExt, KvError};

pub const DID_ONBOARD_KEY: &str = "didOnboard";
pub const EXPIRATION_DAYS_KEY: &str = "expirationDays";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub did_onboard: bool,
    pub expiration_window: ExpirationWindow,
}

impl Preferences {
    pub fn expiry_context(&self, clock: &dyn Clock) -> ExpiryContext {
        ExpiryContext::from_clock(clock, self.expiration_window)
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] KvError),
}

/// Reads and writes [`Preferences`] in a key-value store.
#[derive(Debug)]
pub struct PreferenceStore<S> {
    storage: S,
}

impl<S> PreferenceStore<S>
where
    S: KeyValueStore,
{
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load preferences. Missing or unreadable entries fall back to defaults.
    pub fn load(&self) -> Preferences {
        let defaults = Preferences::default();

        let did_onboard = match self.storage.get_typed::<bool>(DID_ONBOARD_KEY) {
            Ok(value) => value.unwrap_or(defaults.did_onboard),
            Err(err) => {
                warn!(key = DID_ONBOARD_KEY, error = %err, "unreadable preference; using default");
                defaults.did_onboard
            }
        };

        let expiration_window = match self.storage.get_typed::<u32>(EXPIRATION_DAYS_KEY) {
            Ok(Some(days)) => ExpirationWindow::new(days).unwrap_or_else(|err| {
                warn!(key = EXPIRATION_DAYS_KEY, days, error = %err, "stored window out of range; using default");
                defaults.expiration_window
            }),
            Ok(None) => defaults.expiration_window,
            Err(err) => {
                warn!(key = EXPIRATION_DAYS_KEY, error = %err, "unreadable preference; using default");
                defaults.expiration_window
            }
        };

        Preferences {
            did_onboard,
            expiration_window,
        }
    }

    pub fn complete_onboarding(&self) -> Result<(), PreferenceError> {
        self.storage.set_typed(DID_ONBOARD_KEY, &true)?;
        info!("onboarding completed");
        Ok(())
    }

    /// Validate and store the alert window. Out-of-range values leave the
    /// stored setting untouched.
    pub fn set_expiration_days(&self, days: u32) -> Result<ExpirationWindow, PreferenceError> {
        let window = ExpirationWindow::new(days)?;
        self.storage.set_typed(EXPIRATION_DAYS_KEY, &window.days())?;
        info!(days, "expiration window updated");
        Ok(window)
    }
}
