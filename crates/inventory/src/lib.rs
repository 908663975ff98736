//! Inventory domain module.
//!
//! This crate contains the business rules for the pantry: what an item is,
//! when it counts as expired, expiring soon, low or out of stock, and safe to
//! eat. Everything here is deterministic domain logic (no IO, no storage);
//! "today" and the expiration window are always passed in explicitly.

pub mod category;
pub mod discard;
pub mod entry;
pub mod expiration;
pub mod item;
pub mod scan;
pub mod views;

pub use category::Category;
pub use discard::Disposition;
pub use entry::{EntryForm, EntryIntent};
pub use expiration::{Clock, ExpirationWindow, ExpiryContext, FixedClock, SystemClock};
pub use item::{Item, ItemStatus};
pub use pantry_core::ItemId;
pub use scan::{Produce, ScanEvent};
pub use views::InventoryView;
