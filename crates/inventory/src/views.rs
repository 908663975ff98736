//! Lookups and derived views over an item collection.
//!
//! All views are plain linear filters that keep insertion order. Nothing is
//! cached; collections are expected to hold tens to low hundreds of items.

use pantry_core::ItemId;

use crate::expiration::ExpiryContext;
use crate::item::Item;

pub trait InventoryView {
    /// First item whose barcode equals `code`.
    fn find_by_code(&self, code: &str) -> Option<&Item>;

    fn find_by_id(&self, id: ItemId) -> Option<&Item>;

    /// First item whose name equals `name` exactly.
    fn find_by_name(&self, name: &str) -> Option<&Item>;

    fn expired(&self, ctx: &ExpiryContext) -> Vec<&Item>;

    fn expiring_soon(&self, ctx: &ExpiryContext) -> Vec<&Item>;

    /// Safe to eat.
    fn edible(&self, ctx: &ExpiryContext) -> Vec<&Item>;

    fn low_on_stock(&self, ctx: &ExpiryContext) -> Vec<&Item>;

    fn out_of_stock(&self, ctx: &ExpiryContext) -> Vec<&Item>;

    fn has_expired(&self, ctx: &ExpiryContext) -> bool {
        !self.expired(ctx).is_empty()
    }

    fn has_expiring_soon(&self, ctx: &ExpiryContext) -> bool {
        !self.expiring_soon(ctx).is_empty()
    }

    fn has_edible(&self, ctx: &ExpiryContext) -> bool {
        !self.edible(ctx).is_empty()
    }
}

impl InventoryView for [Item] {
    fn find_by_code(&self, code: &str) -> Option<&Item> {
        self.iter().find(|i| i.code() == code)
    }

    fn find_by_id(&self, id: ItemId) -> Option<&Item> {
        self.iter().find(|i| i.id() == id)
    }

    fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.iter().find(|i| i.name() == name)
    }

    fn expired(&self, ctx: &ExpiryContext) -> Vec<&Item> {
        self.iter().filter(|i| i.is_expired(ctx)).collect()
    }

    fn expiring_soon(&self, ctx: &ExpiryContext) -> Vec<&Item> {
        self.iter().filter(|i| i.is_expiring_soon(ctx)).collect()
    }

    fn edible(&self, ctx: &ExpiryContext) -> Vec<&Item> {
        self.iter().filter(|i| i.is_edible(ctx)).collect()
    }

    fn low_on_stock(&self, ctx: &ExpiryContext) -> Vec<&Item> {
        self.iter().filter(|i| i.is_low_on_stock(ctx)).collect()
    }

    fn out_of_stock(&self, ctx: &ExpiryContext) -> Vec<&Item> {
        self.iter().filter(|i| i.is_out_of_stock(ctx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, ExpirationWindow};
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 3).unwrap()
    }

    fn ctx() -> ExpiryContext {
        ExpiryContext::new(today(), ExpirationWindow::default())
    }

    fn item(name: &str, category: Category, quantity: u32, days: i64) -> Item {
        let expires_on = if days >= 0 {
            today().checked_add_days(Days::new(days as u64)).unwrap()
        } else {
            today().checked_sub_days(Days::new(days.unsigned_abs())).unwrap()
        };
        Item::new(name, category, expires_on).unwrap().with_quantity(quantity)
    }

    fn pantry() -> Vec<Item> {
        vec![
            item("Milk", Category::Milk, 0, -1),
            item("Eggs", Category::Eggs, 2, 10),
            item("Bleach", Category::Cleaning, 1, 300),
            item("Yogurt", Category::Milk, 6, 2),
            item("Rice", Category::Canned, 0, 200).with_code("0001"),
            item("Steak", Category::Meat, 1, -5).with_code("0001"),
        ]
    }

    fn names(items: Vec<&Item>) -> Vec<&str> {
        items.into_iter().map(Item::name).collect()
    }

    #[test]
    fn views_keep_insertion_order() {
        let items = pantry();
        assert_eq!(names(items.expired(&ctx())), vec!["Milk", "Steak"]);
        assert_eq!(names(items.expiring_soon(&ctx())), vec!["Yogurt"]);
        assert_eq!(names(items.edible(&ctx())), vec!["Eggs", "Yogurt", "Rice"]);
        assert_eq!(names(items.low_on_stock(&ctx())), vec!["Eggs", "Bleach"]);
        assert_eq!(names(items.out_of_stock(&ctx())), vec!["Rice"]);
    }

    #[test]
    fn has_views_mirror_filters() {
        let items = pantry();
        assert!(items.has_expired(&ctx()));
        assert!(items.has_expiring_soon(&ctx()));
        assert!(items.has_edible(&ctx()));

        let empty: Vec<Item> = Vec::new();
        assert!(!empty.has_expired(&ctx()));
        assert!(!empty.has_expiring_soon(&ctx()));
        assert!(!empty.has_edible(&ctx()));
    }

    #[test]
    fn lookups_return_first_match() {
        let items = pantry();
        assert_eq!(items.find_by_code("0001").map(Item::name), Some("Rice"));
        assert_eq!(items.find_by_name("Yogurt").map(Item::quantity), Some(6));
        assert!(items.find_by_name("yogurt").is_none());
        assert!(items.find_by_code("9999").is_none());

        let eggs = &items[1];
        assert_eq!(items.find_by_id(eggs.id()), Some(eggs));
        assert!(items.find_by_id(ItemId::new()).is_none());
    }

    fn arb_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn edible_excludes_cleaning_and_expired(
            specs in prop::collection::vec((arb_category(), 0u32..8, -20i64..20), 0..30)
        ) {
            let items: Vec<Item> = specs
                .into_iter()
                .map(|(category, quantity, days)| item("Thing", category, quantity, days))
                .collect();

            for edible in items.edible(&ctx()) {
                prop_assert_ne!(edible.category(), Category::Cleaning);
                prop_assert!(!edible.is_expired(&ctx()));
            }
            let expected = items
                .iter()
                .filter(|i| i.category() != Category::Cleaning && !i.is_expired(&ctx()))
                .count();
            prop_assert_eq!(items.edible(&ctx()).len(), expected);
        }
    }
}
