//! The item entry form and how it is pre-populated.
//!
//! Every way of adding or editing an item ends in the same form. What differs
//! is how it is seeded: blank, from an existing item, from a scanned barcode,
//! or from detected produce.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, ItemId};

use crate::category::Category;
use crate::item::Item;
use crate::scan::Produce;
use crate::views::InventoryView;

/// Default shelf life offered for a new item.
pub const DEFAULT_SHELF_LIFE_DAYS: u64 = 5;

/// Why the entry form is being shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EntryIntent {
    Manual,
    Edit(ItemId),
    Barcode(String),
    Produce(Produce),
}

impl EntryIntent {
    pub fn title(&self) -> &'static str {
        match self {
            EntryIntent::Manual => "Manual Entry",
            EntryIntent::Edit(_) => "Edit Item",
            EntryIntent::Barcode(_) => "Add item",
            EntryIntent::Produce(_) => "Add Produce",
        }
    }
}

/// Editable draft of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryForm {
    pub intent: EntryIntent,
    /// Set when the form was seeded from an existing item; submitting then
    /// replaces that item instead of creating a new one.
    pub editing: Option<ItemId>,
    pub name: String,
    pub code: String,
    pub category: Category,
    pub icon: String,
    pub price: Decimal,
    pub quantity: u32,
    pub expires_on: NaiveDate,
}

impl EntryForm {
    /// Empty form: vegetables, one unit, free, five days of shelf life.
    ///
    /// Fails only when `today` is too close to the end of the calendar to
    /// add the default shelf life.
    pub fn blank(intent: EntryIntent, today: NaiveDate) -> DomainResult<Self> {
        let category = Category::Vegetables;
        let expires_on = today
            .checked_add_days(Days::new(DEFAULT_SHELF_LIFE_DAYS))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "no date {DEFAULT_SHELF_LIFE_DAYS} days after {today}"
                ))
            })?;
        Ok(Self {
            intent,
            editing: None,
            name: String::new(),
            code: String::new(),
            category,
            icon: category.default_icon().to_string(),
            price: Decimal::ZERO,
            quantity: 1,
            expires_on,
        })
    }

    /// Seed the form for `intent`, looking up existing items in `items`.
    pub fn prefill(intent: EntryIntent, items: &[Item], today: NaiveDate) -> DomainResult<Self> {
        let mut form = Self::blank(intent.clone(), today)?;
        match intent {
            EntryIntent::Manual => {}
            EntryIntent::Edit(id) => {
                if let Some(existing) = items.find_by_id(id) {
                    form.copy_from(existing);
                }
            }
            EntryIntent::Barcode(code) => {
                if let Some(existing) = items.find_by_code(&code) {
                    form.copy_from(existing);
                }
                form.code = code;
            }
            EntryIntent::Produce(produce) => {
                if let Some(existing) = items.find_by_name(produce.display_name()) {
                    form.copy_from(existing);
                }
                form.category = produce.category();
                form.icon = produce.category().default_icon().to_string();
                form.name = produce.display_name().to_string();
            }
        }
        Ok(form)
    }

    fn copy_from(&mut self, item: &Item) {
        self.editing = Some(item.id());
        self.name = item.name().to_string();
        self.code = item.code().to_string();
        self.category = item.category();
        self.icon = item.icon().to_string();
        self.price = item.price();
        self.quantity = item.quantity();
        self.expires_on = item.expires_on();
    }

    /// Switch category; the icon follows the new category's default.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.icon = category.default_icon().to_string();
    }

    pub fn is_update(&self) -> bool {
        self.editing.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_update() {
            "Update Pantry"
        } else {
            "Add to Pantry"
        }
    }

    /// Validate and build the item. Reuses the edited item's id, if any.
    pub fn submit(self) -> DomainResult<Item> {
        let item = Item::new(self.name, self.category, self.expires_on)?
            .with_icon(self.icon)
            .with_price(self.price)?
            .with_code(self.code)
            .with_quantity(self.quantity);
        Ok(match self.editing {
            Some(id) => item.with_id(id),
            None => item,
        })
    }
}
