//! Product types.

use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Product condition as shown on the shop grid.
///
/// The backend stores free text; the two values the shop filters on get
/// their own variants and anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Condition {
    #[default]
    New,
    PreOwned,
    Other(String),
}

impl Condition {
    pub fn as_str(&self) -> &str {
        match self {
            Condition::New => "new",
            Condition::PreOwned => "pre-owned",
            Condition::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "new" => Condition::New,
            "pre-owned" | "preowned" | "used" => Condition::PreOwned,
            _ => Condition::Other(s.trim().to_string()),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Condition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Condition::parse(&raw))
    }
}

/// A product in the shop catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    #[serde(alias = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Selling price.
    #[serde(with = "money::as_decimal")]
    pub price: Money,
    /// Price before markdown, if the product is on sale.
    #[serde(
        default,
        with = "money::option_as_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Money>,
    /// New or pre-owned.
    #[serde(default)]
    pub condition: Condition,
    /// Category slug (e.g., "cables", "batteries").
    #[serde(default)]
    pub category: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Units on hand, when the backend tracks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    /// Whether the product can be ordered.
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Create a product with the fields the cart needs.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        condition: Condition,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            condition,
            category: String::new(),
            description: String::new(),
            image: None,
            stock: None,
            in_stock: true,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Check if the product is discounted.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|original| original.amount_cents > self.price.amount_cents)
            .unwrap_or(false)
    }

    /// Discount as a whole percentage of the original price.
    pub fn discount_percent(&self) -> Option<u8> {
        let original = self.original_price?;
        if original.amount_cents <= 0 || original.amount_cents <= self.price.amount_cents {
            return None;
        }
        let saved = original.amount_cents - self.price.amount_cents;
        Some(((saved * 100) / original.amount_cents) as u8)
    }
}

/// Shop grid filter. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub condition: Option<Condition>,
    /// Case-insensitive text matched against name and description.
    pub search: Option<String>,
}

impl ProductFilter {
    /// Build a filter from UI values, where `"all"` disables a criterion.
    pub fn from_selection(category: &str, condition: &str) -> Self {
        let pick = |s: &str| {
            let s = s.trim();
            (!s.is_empty() && !s.eq_ignore_ascii_case("all")).then(|| s.to_string())
        };
        Self {
            category: pick(category),
            condition: pick(condition).map(|c| Condition::parse(&c)),
            search: None,
        }
    }

    /// Also require `text` in the name or description.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let text = text.into().trim().to_lowercase();
        self.search = (!text.is_empty()).then_some(text);
        self
    }

    /// Check if a product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        let category_match = self
            .category
            .as_ref()
            .map_or(true, |c| product.category.eq_ignore_ascii_case(c));
        let condition_match = self
            .condition
            .as_ref()
            .map_or(true, |c| &product.condition == c);
        let search_match = self.search.as_ref().map_or(true, |needle| {
            product.name.to_lowercase().contains(needle.as_str())
                || product.description.to_lowercase().contains(needle.as_str())
        });
        category_match && condition_match && search_match
    }

    /// Apply the filter to a product list.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    /// Query-string pairs for the products endpoint. Search stays client side.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(condition) = &self.condition {
            pairs.push(("condition", condition.as_str().to_string()));
        }
        pairs
    }
}
