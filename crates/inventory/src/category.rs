//! Fixed item categories and their icon glyphs.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, ValueObject};

/// Category of a pantry item.
///
/// Serialized as the display name (e.g. `"Cleaning Supplies"`), which is also
/// the sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fruit")]
    Fruit,
    #[serde(rename = "Eggs")]
    Eggs,
    #[serde(rename = "Vegetables")]
    Vegetables,
    #[serde(rename = "Dessert")]
    Dessert,
    #[serde(rename = "Ice Cream")]
    IceCream,
    #[serde(rename = "Canned Food")]
    Canned,
    #[serde(rename = "Condiment")]
    Condiment,
    #[serde(rename = "Cleaning Supplies")]
    Cleaning,
    #[serde(rename = "Snack")]
    Snack,
    #[serde(rename = "Milk")]
    Milk,
    #[serde(rename = "Juice")]
    Juice,
    #[serde(rename = "Cereal")]
    Cereal,
    #[serde(rename = "Meat")]
    Meat,
    #[serde(rename = "Frozen Food")]
    FrozenFood,
}

impl ValueObject for Category {}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 14] = [
        Category::Fruit,
        Category::Eggs,
        Category::Vegetables,
        Category::Dessert,
        Category::IceCream,
        Category::Canned,
        Category::Condiment,
        Category::Cleaning,
        Category::Snack,
        Category::Milk,
        Category::Juice,
        Category::Cereal,
        Category::Meat,
        Category::FrozenFood,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Fruit => "Fruit",
            Category::Eggs => "Eggs",
            Category::Vegetables => "Vegetables",
            Category::Dessert => "Dessert",
            Category::IceCream => "Ice Cream",
            Category::Canned => "Canned Food",
            Category::Condiment => "Condiment",
            Category::Cleaning => "Cleaning Supplies",
            Category::Snack => "Snack",
            Category::Milk => "Milk",
            Category::Juice => "Juice",
            Category::Cereal => "Cereal",
            Category::Meat => "Meat",
            Category::FrozenFood => "Frozen Food",
        }
    }

    /// Glyph used when the user hasn't picked one.
    pub fn default_icon(&self) -> &'static str {
        match self {
            Category::Fruit => "🍎",
            Category::Eggs => "🥚",
            Category::Vegetables => "🥦",
            Category::Dessert => "🧁",
            Category::IceCream => "🍦",
            Category::Canned => "🥫",
            Category::Condiment => "🧈",
            Category::Cleaning => "🧼",
            Category::Snack => "🍿",
            Category::Milk => "🥛",
            Category::Juice => "🧃",
            Category::Cereal => "🥣",
            Category::Meat => "🥩",
            Category::FrozenFood => "🧊",
        }
    }

    /// Glyphs offered in the icon picker for this category.
    pub fn icons(&self) -> &'static [&'static str] {
        match self {
            Category::Fruit => &[
                "🍒", "🍓", "🍑", "🥥", "🍇", "🍎", "🥑", "🍊", "🍋", "🥝", "🍌", "🍉", "🍐", "🫐",
                "🥭",
            ],
            Category::Eggs => &["🥚"],
            Category::Vegetables => &[
                "🌶️", "🥕", "🧅", "🥒", "🌽", "🍅", "🥦", "🧄", "🍆", "🥔", "🫑",
            ],
            Category::Dessert => &["🎂", "🍰", "🧁", "🥧", "🥮"],
            Category::IceCream => &["🍦", "🍨"],
            Category::Canned => &["🥫"],
            Category::Condiment => &["🧈"],
            Category::Cleaning => &["🧻", "🧼", "🧽"],
            Category::Snack => &["🍟", "🍿", "🥨", "🍪", "🍭", "🍩", "🍬"],
            Category::Milk => &["🥛", "🍼"],
            Category::Juice => &["🧃"],
            Category::Cereal => &["🥣"],
            Category::Meat => &["🍗", "🥓", "🥩", "🍖"],
            Category::FrozenFood => &["🧊"],
        }
    }

    /// Whether anything in this category can be eaten at all.
    pub fn is_food(&self) -> bool {
        !matches!(self, Category::Cleaning)
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.display_name().cmp(other.display_name())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::validation(format!("unknown category: {needle}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_icon_is_always_selectable() {
        for category in Category::ALL {
            assert!(
                category.icons().contains(&category.default_icon()),
                "{category} default icon missing from its picker"
            );
        }
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Category::Cleaning).unwrap();
        assert_eq!(json, "\"Cleaning Supplies\"");

        let back: Category = serde_json::from_str("\"Ice Cream\"").unwrap();
        assert_eq!(back, Category::IceCream);
    }

    #[test]
    fn parses_display_name_case_insensitively() {
        assert_eq!("frozen food".parse::<Category>().unwrap(), Category::FrozenFood);
        assert_eq!("  Milk ".parse::<Category>().unwrap(), Category::Milk);
        assert!(matches!(
            "Bread".parse::<Category>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn orders_by_display_name() {
        let mut all = Category::ALL.to_vec();
        all.sort();
        assert_eq!(all.first(), Some(&Category::Canned));
        assert_eq!(all.last(), Some(&Category::Vegetables));
    }

    #[test]
    fn only_cleaning_supplies_are_not_food() {
        let inedible: Vec<_> = Category::ALL.into_iter().filter(|c| !c.is_food()).collect();
        assert_eq!(inedible, vec![Category::Cleaning]);
    }
}
