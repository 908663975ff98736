//! CLI command implementations.

pub mod add;
pub mod discard;
pub mod edit;
pub mod list;
pub mod scan;
pub mod settings;

use anyhow::{Context as _, Result};
use chrono::{Days, NaiveDate};
use clap::{Args, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use pantry_core::ItemId;
use pantry_inventory::{Category, EntryForm};

use crate::context::Context;

/// Item fields shared by `add`, `edit` and `scan`; each one overrides the form.
#[derive(Args, Debug, Default)]
pub struct ItemFields {
    /// Item name.
    #[arg(long)]
    pub name: Option<String>,

    /// Category (e.g. "Milk", "snack", "Frozen Food").
    #[arg(long)]
    pub category: Option<Category>,

    /// Emoji icon; defaults to the category's icon.
    #[arg(long)]
    pub icon: Option<String>,

    /// Unit price.
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Barcode.
    #[arg(long)]
    pub code: Option<String>,

    /// Units on hand.
    #[arg(short, long)]
    pub quantity: Option<u32>,

    /// Expiration date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub expires_on: Option<NaiveDate>,

    /// Expiration as a number of days from today.
    #[arg(long, value_name = "DAYS", conflicts_with = "expires_on")]
    pub expires_in: Option<u64>,
}

impl ItemFields {
    pub fn apply(self, form: &mut EntryForm, today: NaiveDate) -> Result<()> {
        if let Some(category) = self.category {
            form.set_category(category);
        }
        if let Some(icon) = self.icon {
            form.icon = icon;
        }
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(code) = self.code {
            form.code = code;
        }
        if let Some(quantity) = self.quantity {
            form.quantity = quantity;
        }
        if let Some(expires_on) = self.expires_on {
            form.expires_on = expires_on;
        }
        if let Some(days) = self.expires_in {
            form.expires_on = today.checked_add_days(Days::new(days)).with_context(|| {
                format!("--expires-in {days} is past the last representable date")
            })?;
        }
        Ok(())
    }
}

/// Which slice of the pantry `list` shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Expiring soon, expired, then everything.
    #[default]
    Home,
    All,
    Expired,
    Expiring,
    Edible,
    Low,
    Out,
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// What to show.
    #[arg(short, long, value_enum, default_value_t = View::Home)]
    pub view: View,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: ItemFields,
}

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Item id.
    pub id: ItemId,

    #[command(flatten)]
    pub fields: ItemFields,
}

/// Arguments for the discard command.
#[derive(Args)]
pub struct DiscardArgs {
    /// Item id.
    pub id: ItemId,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    #[command(subcommand)]
    pub command: ScanCommand,

    #[command(flatten)]
    pub fields: ItemFields,

    /// Save the resulting form instead of only showing it.
    #[arg(long)]
    pub save: bool,
}

#[derive(Subcommand)]
pub enum ScanCommand {
    /// A barcode was read.
    Barcode {
        /// Barcode payload.
        code: String,
    },
    /// The object detector recognised something.
    Object {
        /// Detector label (apple, banana, carrot, cucumber, grapes, onion, oranges, tomato).
        label: String,
    },
}

/// Arguments for the settings command.
#[derive(Args)]
pub struct SettingsArgs {
    /// Days ahead of expiry an item counts as expiring soon (3-9).
    #[arg(long)]
    pub expiration_days: Option<u32>,
}

/// Submit `form` through the store and report the result.
fn save_form(form: EntryForm, ctx: &Context) -> Result<()> {
    let label = form.submit_label();
    let (item, status) = ctx.store.save_entry(form).context("item was not saved")?;

    if status.is_saved() {
        ctx.output.success(&format!("{label}: {}", item.name()));
    }
    ctx.output.item(&item, &ctx.expiry());
    Ok(())
}
