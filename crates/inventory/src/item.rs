use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, ItemId};

use crate::category::Category;
use crate::discard::Disposition;
use crate::expiration::{ExpiryContext, expiry_label};

/// Quantity at or below which (and above zero) stock counts as low.
pub const LOW_STOCK_THRESHOLD: u32 = 4;

/// A tracked unit of merchandise.
///
/// Only stored attributes live here. Expired / expiring / stock states are
/// derived on read from an [`ExpiryContext`] and never persisted.
///
/// Deserialization goes through the same checks as [`Item::new`] and
/// [`Item::with_price`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ItemRecord")]
pub struct Item {
    id: ItemId,
    name: String,
    category: Category,
    icon: String,
    price: Decimal,
    code: String,
    quantity: u32,
    expires_on: NaiveDate,
}

/// Stored shape of an [`Item`], before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    id: ItemId,
    name: String,
    category: Category,
    icon: String,
    price: Decimal,
    code: String,
    quantity: u32,
    expires_on: NaiveDate,
}

impl TryFrom<ItemRecord> for Item {
    type Error = DomainError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Ok(Item::new(record.name, record.category, record.expires_on)?
            .with_id(record.id)
            .with_icon(record.icon)
            .with_price(record.price)?
            .with_code(record.code)
            .with_quantity(record.quantity))
    }
}

impl Item {
    /// Create an item with a fresh id, the category's default icon, no
    /// barcode, price 0 and quantity 1.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        expires_on: NaiveDate,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id: ItemId::new(),
            name,
            category,
            icon: category.default_icon().to_string(),
            price: Decimal::ZERO,
            code: String::new(),
            quantity: 1,
            expires_on,
        })
    }

    /// Re-key this item so that submitting it replaces an existing entry.
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        let icon = icon.into();
        self.icon = if icon.trim().is_empty() {
            self.category.default_icon().to_string()
        } else {
            icon
        };
        self
    }

    pub fn with_price(mut self, price: Decimal) -> DomainResult<Self> {
        if price < Decimal::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }
        self.price = price;
        Ok(self)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn expires_on(&self) -> NaiveDate {
        self.expires_on
    }

    pub fn days_remaining(&self, ctx: &ExpiryContext) -> i64 {
        ctx.days_until(self.expires_on)
    }

    pub fn is_expired(&self, ctx: &ExpiryContext) -> bool {
        self.days_remaining(ctx) <= 0
    }

    /// Inside the window, counting today. An item expiring today is both
    /// expired and expiring soon.
    pub fn is_expiring_soon(&self, ctx: &ExpiryContext) -> bool {
        let days = self.days_remaining(ctx);
        days >= 0 && days <= i64::from(ctx.window.days())
    }

    /// Stock doesn't matter once the item has expired.
    pub fn is_out_of_stock(&self, ctx: &ExpiryContext) -> bool {
        self.quantity == 0 && !self.is_expired(ctx)
    }

    pub fn is_low_on_stock(&self, ctx: &ExpiryContext) -> bool {
        (1..=LOW_STOCK_THRESHOLD).contains(&self.quantity) && !self.is_expired(ctx)
    }

    /// Safe to eat: not expired and not a cleaning supply.
    pub fn is_edible(&self, ctx: &ExpiryContext) -> bool {
        !self.is_expired(ctx) && self.category.is_food()
    }

    /// Expired stock goes straight out; anything else asks first.
    pub fn disposition(&self, ctx: &ExpiryContext) -> Disposition {
        if self.is_expired(ctx) && !self.is_out_of_stock(ctx) {
            Disposition::Immediate
        } else {
            Disposition::RequiresConfirmation
        }
    }

    pub fn status(&self, ctx: &ExpiryContext) -> ItemStatus {
        ItemStatus {
            days_remaining: self.days_remaining(ctx),
            expired: self.is_expired(ctx),
            expiring_soon: self.is_expiring_soon(ctx),
            out_of_stock: self.is_out_of_stock(ctx),
            low_on_stock: self.is_low_on_stock(ctx),
            edible: self.is_edible(ctx),
        }
    }
}

/// Snapshot of every derived predicate for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemStatus {
    pub days_remaining: i64,
    pub expired: bool,
    pub expiring_soon: bool,
    pub out_of_stock: bool,
    pub low_on_stock: bool,
    pub edible: bool,
}

impl ItemStatus {
    /// Shelf-life label; "Expired" wins over "Expires Today".
    pub fn expiry_label(&self) -> String {
        if self.expired {
            return "Expired".to_string();
        }
        expiry_label(self.days_remaining)
    }

    pub fn stock_label(&self) -> Option<&'static str> {
        if self.low_on_stock {
            Some("Low Stock")
        } else if self.out_of_stock {
            Some("Out of Stock")
        } else {
            None
        }
    }

    /// The single most urgent state, as shown on an item's detail page.
    pub fn headline(&self) -> Option<String> {
        if let Some(stock) = self.stock_label() {
            return Some(stock.to_string());
        }
        if self.expired {
            return Some("Expired".to_string());
        }
        if self.expiring_soon {
            return Some(expiry_label(self.days_remaining));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiration::ExpirationWindow;
    use chrono::Days;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn ctx() -> ExpiryContext {
        ExpiryContext::new(today(), ExpirationWindow::default())
    }

    fn in_days(days: i64) -> NaiveDate {
        if days >= 0 {
            today().checked_add_days(Days::new(days as u64)).unwrap()
        } else {
            today().checked_sub_days(Days::new(days.unsigned_abs())).unwrap()
        }
    }

    fn item(name: &str, category: Category, quantity: u32, days: i64) -> Item {
        Item::new(name, category, in_days(days))
            .unwrap()
            .with_quantity(quantity)
    }

    #[test]
    fn new_item_has_defaults() {
        let item = Item::new("Broccoli", Category::Vegetables, in_days(5)).unwrap();
        assert_eq!(item.icon(), "🥦");
        assert_eq!(item.price(), Decimal::ZERO);
        assert_eq!(item.code(), "");
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn rejects_blank_name() {
        let err = Item::new("  ", Category::Snack, in_days(1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_negative_price() {
        let item = Item::new("Chips", Category::Snack, in_days(1)).unwrap();
        assert!(item.clone().with_price(Decimal::new(-1, 2)).is_err());
        assert_eq!(
            item.with_price(Decimal::new(349, 2)).unwrap().price(),
            Decimal::new(349, 2)
        );
    }

    #[test]
    fn blank_icon_falls_back_to_category_default() {
        let item = Item::new("Soap", Category::Cleaning, in_days(90))
            .unwrap()
            .with_icon("");
        assert_eq!(item.icon(), "🧼");
    }

    #[test]
    fn milk_past_date_with_no_stock_is_expired_not_out_of_stock() {
        let milk = item("Milk", Category::Milk, 0, -1);
        assert!(milk.is_expired(&ctx()));
        assert!(!milk.is_out_of_stock(&ctx()));
    }

    #[test]
    fn eggs_far_from_expiry_are_low_on_stock_only() {
        let eggs = item("Eggs", Category::Eggs, 2, 10);
        assert!(eggs.is_low_on_stock(&ctx()));
        assert!(!eggs.is_expiring_soon(&ctx()));
        assert!(!eggs.is_expired(&ctx()));
    }

    #[test]
    fn expiring_today_is_expired_and_expiring_soon() {
        let bread = item("Bread", Category::Snack, 1, 0);
        let status = bread.status(&ctx());
        assert!(status.expired);
        assert!(status.expiring_soon);
        assert_eq!(status.expiry_label(), "Expired");
    }

    #[test]
    fn window_edges() {
        let window = ExpirationWindow::new(5).unwrap();
        let ctx = ExpiryContext::new(today(), window);
        assert!(item("Yogurt", Category::Milk, 3, 5).is_expiring_soon(&ctx));
        assert!(!item("Yogurt", Category::Milk, 3, 6).is_expiring_soon(&ctx));
        assert!(!item("Yogurt", Category::Milk, 3, -2).is_expiring_soon(&ctx));
    }

    #[test]
    fn empty_fresh_item_is_out_of_stock() {
        let rice = item("Rice", Category::Canned, 0, 30);
        let status = rice.status(&ctx());
        assert!(status.out_of_stock);
        assert!(!status.low_on_stock);
        assert_eq!(status.stock_label(), Some("Out of Stock"));
        assert_eq!(status.headline().as_deref(), Some("Out of Stock"));
    }

    #[test]
    fn five_or_more_is_not_low() {
        assert!(!item("Apples", Category::Fruit, 5, 10).is_low_on_stock(&ctx()));
        assert!(item("Apples", Category::Fruit, 4, 10).is_low_on_stock(&ctx()));
    }

    #[test]
    fn cleaning_supplies_are_never_edible() {
        assert!(!item("Sponge", Category::Cleaning, 3, 100).is_edible(&ctx()));
        assert!(item("Carrots", Category::Vegetables, 3, 100).is_edible(&ctx()));
        assert!(!item("Carrots", Category::Vegetables, 3, -1).is_edible(&ctx()));
    }

    #[test]
    fn expired_stock_is_discarded_without_asking() {
        assert_eq!(
            item("Milk", Category::Milk, 0, -3).disposition(&ctx()),
            Disposition::Immediate
        );
        assert_eq!(
            item("Milk", Category::Milk, 2, 8).disposition(&ctx()),
            Disposition::RequiresConfirmation
        );
        assert_eq!(
            item("Milk", Category::Milk, 0, 8).disposition(&ctx()),
            Disposition::RequiresConfirmation
        );
    }

    #[test]
    fn headline_prefers_expiry_when_stock_is_fine() {
        let status = item("Ham", Category::Meat, 8, 2).status(&ctx());
        assert_eq!(status.headline().as_deref(), Some("Expires in 2 days"));
        let status = item("Ham", Category::Meat, 8, 20).status(&ctx());
        assert_eq!(status.headline(), None);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let item = item("Juice", Category::Juice, 2, 4).with_code("0123456789012");
        let json = serde_json::to_value(&item).unwrap();
        for field in ["id", "name", "category", "icon", "price", "code", "quantity", "expiresOn"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["expiresOn"], "2024-06-19");
        assert_eq!(json["category"], "Juice");
    }

    #[test]
    fn deserializing_applies_item_checks() {
        let stored = item("Juice", Category::Juice, 2, 4);
        let mut json = serde_json::to_value(&stored).unwrap();
        assert_eq!(serde_json::from_value::<Item>(json.clone()).unwrap(), stored);

        json["name"] = "  ".into();
        assert!(serde_json::from_value::<Item>(json.clone()).is_err());

        json["name"] = "Juice".into();
        json["price"] = "-5.00".into();
        let err = serde_json::from_value::<Item>(json).unwrap_err();
        assert!(err.to_string().contains("price cannot be negative"));
    }

    proptest! {
        #[test]
        fn expired_and_out_of_stock_are_exclusive(days in -400i64..400, quantity in 0u32..20) {
            let it = item("Anything", Category::Snack, quantity, days);
            prop_assert!(!(it.is_expired(&ctx()) && it.is_out_of_stock(&ctx())));
        }

        #[test]
        fn small_stock_far_from_expiry_is_low(
            quantity in 1u32..=4,
            window in 3u32..=9,
            extra in 1i64..365,
        ) {
            let window = ExpirationWindow::new(window).unwrap();
            let ctx = ExpiryContext::new(today(), window);
            let it = item("Beans", Category::Canned, quantity, i64::from(window.days()) + extra);
            prop_assert!(it.is_low_on_stock(&ctx));
            prop_assert!(!it.is_expired(&ctx));
            prop_assert!(!it.is_expiring_soon(&ctx));
        }

        #[test]
        fn low_and_out_of_stock_never_overlap(days in -30i64..30, quantity in 0u32..10) {
            let status = item("Oats", Category::Cereal, quantity, days).status(&ctx());
            prop_assert!(!(status.low_on_stock && status.out_of_stock));
        }
    }
}
