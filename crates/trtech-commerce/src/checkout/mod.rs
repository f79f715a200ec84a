//! Checkout module.
//!
//! Contains the checkout state machine, delivery details, the order
//! summary message, hand-off links, and order records.

mod details;
mod flow;
mod handoff;
mod message;
mod order;

pub use details::{DeliveryDetails, DeliveryField};
pub use flow::{transition, CheckoutEvent, CheckoutFlow, CheckoutStep, StepMarker};
pub use handoff::{encode_uri_component, HandoffLink, DEFAULT_CONTACT, DEFAULT_ENDPOINT};
pub use message::{line_summary, render_order_message};
pub use order::{
    NewOrder, Order, OrderCustomer, OrderItem, OrderStatus, PaymentMethod, PaymentStatus,
};
