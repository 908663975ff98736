//! Rules for throwing an item away.

use serde::{Deserialize, Serialize};

/// How a discard request for one item should be handled.
///
/// Computed by [`crate::Item::disposition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Expired and still stocked: remove without asking.
    Immediate,
    /// Still fresh (or already empty): the user has to confirm.
    RequiresConfirmation,
}

impl Disposition {
    /// Whether a discard may proceed given the user's answer.
    pub fn allows(self, confirmed: bool) -> bool {
        match self {
            Disposition::Immediate => true,
            Disposition::RequiresConfirmation => confirmed,
        }
    }

    /// Prompt shown when confirmation is required.
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            Disposition::Immediate => None,
            Disposition::RequiresConfirmation => Some(
                "This item still appears to be fresh. Are you sure you want to throw it away?",
            ),
        }
    }
}
