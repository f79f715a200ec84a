//! Shop domain types and logic for the TR-Tech storefront.
//!
//! This crate provides the pieces the storefront and admin tools are built on:
//!
//! - **Catalog**: Products, services, shop grid filters
//! - **Cart**: Session cart with merge-on-add and quantity floor, plus a null cart
//! - **Checkout**: Auth → Details → Confirmation state machine, order summary, hand-off links
//! - **Orders, repairs, contact**: Records exchanged with the backend
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use trtech_commerce::prelude::*;
//!
//! let cart = SharedCart::new(Arc::new(NullSink));
//! let cable = Product::new(1u64, "Cable", Money::rand(14900), Condition::New);
//! cart.add_to_cart(&cable);
//! cart.add_to_cart(&cable);
//! assert_eq!(cart.total_price().display(), "R298.00");
//!
//! let mut flow = CheckoutFlow::open(None);
//! assert_eq!(flow.step(), CheckoutStep::Auth);
//! flow.continue_as_guest().unwrap();
//! assert_eq!(flow.step(), CheckoutStep::Details);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod customer;
pub mod notify;
pub mod repair;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Condition, Product, ProductFilter, Service};

    // Cart
    pub use crate::cart::{
        cart_or_null, CartChange, CartHandle, CartLineItem, CartState, NullCart, SharedCart,
    };

    // Checkout
    pub use crate::checkout::{
        render_order_message, CheckoutEvent, CheckoutFlow, CheckoutStep, DeliveryDetails,
        DeliveryField, HandoffLink, NewOrder, Order, OrderCustomer, OrderItem, OrderStatus,
        PaymentMethod, PaymentStatus,
    };

    // Customers, repairs, contact
    pub use crate::contact::{ContactForm, ContactMessage};
    pub use crate::customer::{CustomerProfile, PostalAddress};
    pub use crate::repair::{DeviceType, Repair, RepairBooking, RepairStatus};

    // Notices
    pub use crate::notify::{Notice, NoticeKind, NotificationSink, NullSink};
}
