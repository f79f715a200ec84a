//! Cart state and line item types.

use crate::catalog::{Condition, Product};
use crate::ids::ProductId;
use crate::money::{self, Currency, Money};
use serde::{Deserialize, Serialize};

/// One product in the cart with its quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product id, unique within the cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    #[serde(with = "money::as_decimal")]
    pub price: Money,
    /// New or pre-owned.
    pub condition: Condition,
    /// Image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Always at least 1 while the line exists.
    pub quantity: u32,
}

impl CartLineItem {
    /// Create a line for a product with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            condition: product.condition.clone(),
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// `price × quantity`.
    pub fn subtotal(&self) -> Money {
        self.price.saturating_multiply(i64::from(self.quantity))
    }
}

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Added,
    /// An existing line was bumped to this quantity.
    QuantityIncreased(u32),
    /// A line was set to this quantity.
    QuantitySet(u32),
    /// A line was deleted.
    Removed,
    /// Nothing matched the id.
    Unchanged,
    /// Every line was dropped.
    Cleared,
}

/// The set of line items for one session.
///
/// Lines keep the order in which products were first added. Totals are
/// computed from the lines on every call and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CartState {
    items: Vec<CartLineItem>,
    currency: Currency,
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product, merging with an existing line.
    pub fn add(&mut self, product: &Product) -> CartChange {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return CartChange::QuantityIncreased(existing.quantity);
        }

        self.items.push(CartLineItem::from_product(product));
        CartChange::Added
    }

    /// Remove the line for a product. Absent ids are a no-op.
    pub fn remove(&mut self, product_id: &ProductId) -> CartChange {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != product_id);
        if self.items.len() < len_before {
            CartChange::Removed
        } else {
            CartChange::Unchanged
        }
    }

    /// Set a line's quantity. Zero or below removes the line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> CartChange {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|i| &i.id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                CartChange::QuantitySet(quantity)
            }
            None => CartChange::Unchanged,
        }
    }

    /// Drop every line.
    pub fn clear(&mut self) -> CartChange {
        self.items.clear();
        CartChange::Cleared
    }

    /// Take the ordered quantities out of the cart.
    ///
    /// Lines added after the order was captured, and units beyond the
    /// ordered quantity, stay in the cart.
    pub fn settle(&mut self, ordered: &[CartLineItem]) -> CartChange {
        let len_before = self.items.len();
        let total_before = self.total_items();
        for line in ordered {
            if let Some(item) = self.items.iter_mut().find(|i| i.id == line.id) {
                item.quantity = item.quantity.saturating_sub(line.quantity);
            }
        }
        self.items.retain(|i| i.quantity > 0);

        if self.items.is_empty() && len_before > 0 {
            CartChange::Cleared
        } else if self.items.len() < len_before || self.total_items() < total_before {
            CartChange::Removed
        } else {
            CartChange::Unchanged
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == product_id)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `price × quantity`.
    pub fn total_price(&self) -> Money {
        let cents = self
            .items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.subtotal().amount_cents));
        Money::new(cents, self.currency)
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, name: &str, cents: i64) -> Product {
        Product::new(id, name, Money::rand(cents), Condition::New)
    }

    #[test]
    fn test_cart_creation() {
        let cart = CartState::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Money::rand(0));
    }

    #[test]
    fn test_add_same_item_merges() {
        let mut cart = CartState::new();
        let cable = product(1, "Cable", 14900);

        assert_eq!(cart.add(&cable), CartChange::Added);
        assert_eq!(cart.add(&cable), CartChange::QuantityIncreased(2));
        assert_eq!(cart.add(&cable), CartChange::QuantityIncreased(3));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = CartState::new();
        cart.add(&product(2, "Battery", 34900));
        cart.add(&product(1, "Cable", 14900));
        cart.add(&product(2, "Battery", 34900));

        let names: Vec<_> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Battery", "Cable"]);
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let mut cart = CartState::new();
        let cable = product(1, "Cable", 14900);
        cart.add(&cable);
        cart.add(&cable);

        assert_eq!(cart.set_quantity(&cable.id, 5), CartChange::QuantitySet(5));
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_set_quantity_floor_removes() {
        for q in [0, -1, -50] {
            let mut cart = CartState::new();
            let cable = product(1, "Cable", 14900);
            cart.add(&cable);
            cart.add(&cable);

            assert_eq!(cart.set_quantity(&cable.id, q), CartChange::Removed);
            assert!(cart.get(&cable.id).is_none());
        }
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = CartState::new();
        assert_eq!(
            cart.set_quantity(&ProductId::new("missing"), 3),
            CartChange::Unchanged
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut cart = CartState::new();
        let cable = product(1, "Cable", 14900);
        cart.add(&cable);

        assert_eq!(cart.remove(&cable.id), CartChange::Removed);
        let snapshot = cart.clone();
        assert_eq!(cart.remove(&cable.id), CartChange::Unchanged);
        assert_eq!(cart, snapshot);
    }

    #[test]
    fn test_totals_follow_mutations() {
        let mut cart = CartState::new();
        let cable = product(1, "Cable", 14900);
        let ssd = product(2, "SSD", 89950);

        cart.add(&cable);
        cart.add(&cable);
        cart.add(&ssd);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Money::rand(2 * 14900 + 89950));

        cart.set_quantity(&ssd.id, 3);
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), Money::rand(2 * 14900 + 3 * 89950));

        cart.remove(&cable.id);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Money::rand(3 * 89950));

        cart.clear();
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_settle_keeps_lines_added_later() {
        let mut cart = CartState::new();
        let cable = product(1, "Cable", 14900);
        cart.add(&cable);
        cart.add(&cable);
        let ordered = cart.items().to_vec();

        cart.add(&cable);
        cart.add(&product(3, "SSD", 89900));

        assert_eq!(cart.settle(&ordered), CartChange::Removed);
        assert_eq!(cart.get(&cable.id).map(|i| i.quantity), Some(1));
        assert_eq!(cart.total_items(), 2);

        let rest = cart.items().to_vec();
        assert_eq!(cart.settle(&rest), CartChange::Cleared);
        assert!(cart.is_empty());
        assert_eq!(cart.settle(&rest), CartChange::Unchanged);
    }

    #[test]
    fn test_line_subtotal() {
        let mut line = CartLineItem::from_product(&product(1, "Cable", 14900));
        line.quantity = 2;
        assert_eq!(line.subtotal().display(), "R298.00");
    }
}
