//! Shared cart handle and the null cart used outside a cart scope.

use super::cart::{CartChange, CartLineItem, CartState};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use crate::notify::{Notice, NotificationSink, NullSink};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Cart operations exposed to views and checkout.
///
/// Every view in a session talks to the same cart through this trait. A
/// caller that has no cart in scope gets [`NullCart`], which reads as
/// empty and ignores writes.
pub trait CartHandle: Send + Sync {
    /// Snapshot of the line items, in insertion order.
    fn items(&self) -> Vec<CartLineItem>;

    /// Add one unit of a product.
    fn add_to_cart(&self, product: &Product);

    /// Remove a product's line entirely.
    fn remove_from_cart(&self, product_id: &ProductId);

    /// Set a line's quantity. Zero or below removes it.
    fn update_quantity(&self, product_id: &ProductId, quantity: i64);

    /// Drop every line.
    fn clear_cart(&self);

    /// Take an order's captured lines out of the cart, leaving anything
    /// added since.
    fn settle_order(&self, ordered: &[CartLineItem]);

    /// Sum of quantities.
    fn total_items(&self) -> u64;

    /// Sum of `price × quantity`.
    fn total_price(&self) -> Money;

    /// True when the cart holds no units.
    fn is_empty(&self) -> bool {
        self.total_items() == 0
    }
}

/// Session cart shared between every view that holds a clone.
#[derive(Clone)]
pub struct SharedCart {
    state: Arc<RwLock<CartState>>,
    notifier: Arc<dyn NotificationSink>,
}

impl SharedCart {
    /// Create an empty cart that reports to `notifier`.
    pub fn new(notifier: Arc<dyn NotificationSink>) -> Self {
        Self::with_state(CartState::new(), notifier)
    }

    /// Wrap an existing cart state.
    pub fn with_state(state: CartState, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            notifier,
        }
    }

    /// Create an empty cart that drops notices.
    pub fn silent() -> Self {
        Self::new(Arc::new(NullSink))
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> CartState {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, CartState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("cart lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, CartState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("cart lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for SharedCart {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for SharedCart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCart")
            .field("state", &*self.read())
            .finish_non_exhaustive()
    }
}

impl CartHandle for SharedCart {
    fn items(&self) -> Vec<CartLineItem> {
        self.read().items().to_vec()
    }

    fn add_to_cart(&self, product: &Product) {
        let change = self.write().add(product);
        debug!(product_id = %product.id, ?change, "add to cart");

        let message = match change {
            CartChange::QuantityIncreased(_) => "Quantity updated in cart",
            _ => "Added to cart",
        };
        self.notifier.notify(Notice::success(message));
    }

    fn remove_from_cart(&self, product_id: &ProductId) {
        let change = self.write().remove(product_id);
        debug!(%product_id, ?change, "remove from cart");
        self.notifier.notify(Notice::success("Removed from cart"));
    }

    fn update_quantity(&self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }
        let change = self.write().set_quantity(product_id, quantity);
        debug!(%product_id, quantity, ?change, "update quantity");
    }

    fn clear_cart(&self) {
        self.write().clear();
        debug!("cart cleared");
    }

    fn settle_order(&self, ordered: &[CartLineItem]) {
        let change = self.write().settle(ordered);
        debug!(lines = ordered.len(), ?change, "ordered lines settled");
    }

    fn total_items(&self) -> u64 {
        self.read().total_items()
    }

    fn total_price(&self) -> Money {
        self.read().total_price()
    }
}

/// Cart used when no cart is in scope. Reads empty, writes are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCart;

impl CartHandle for NullCart {
    fn items(&self) -> Vec<CartLineItem> {
        Vec::new()
    }

    fn add_to_cart(&self, _product: &Product) {}

    fn remove_from_cart(&self, _product_id: &ProductId) {}

    fn update_quantity(&self, _product_id: &ProductId, _quantity: i64) {}

    fn clear_cart(&self) {}

    fn settle_order(&self, _ordered: &[CartLineItem]) {}

    fn total_items(&self) -> u64 {
        0
    }

    fn total_price(&self) -> Money {
        Money::default()
    }
}

/// Resolve an optional cart to a handle, falling back to [`NullCart`].
pub fn cart_or_null(cart: Option<Arc<dyn CartHandle>>) -> Arc<dyn CartHandle> {
    cart.unwrap_or_else(|| Arc::new(NullCart))
}
