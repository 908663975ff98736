//! Outbound feedback cues.
//!
//! The inventory never drives haptics or notifications directly. It publishes
//! a `Signal` and whatever presentation layer is attached decides how to
//! render it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// A mutation was persisted.
    Success,
    /// A save failed, or a detection produced nothing usable.
    Failure,
    /// A scan was accepted and an entry form is about to be presented.
    Impact,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Success => "success",
            Signal::Failure => "failure",
            Signal::Impact => "impact",
        }
    }
}

impl core::fmt::Display for Signal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
