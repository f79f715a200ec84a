//! Session orchestration for the TR-Tech shop.
//!
//! A [`Storefront`] bundles the session cart with its collaborators: the
//! auth gate, the order backend, and the opener that launches WhatsApp
//! deep links. [`Storefront::open_checkout`] starts a [`CheckoutSession`],
//! which walks `Auth → Details → Confirmation` and submits the order.
//!
//! Submission records the order with the backend first and only then opens
//! the hand-off link. A hand-off that keeps failing leaves the cart intact
//! and the order recorded; [`CheckoutSession::retry_handoff`] tries again
//! without creating a second order.

mod error;
mod handoff;
mod session;
mod storefront;

pub use error::StorefrontError;
pub use handoff::{HandoffError, HandoffOpener, PendingHandoff};
pub use session::{
    CheckoutSession, OrderReceipt, HANDOFF_FAILED_NOTICE, ORDER_FAILED_NOTICE,
    ORDER_LOCKED_NOTICE, ORDER_SUBMITTED_NOTICE,
};
pub use storefront::{Storefront, StorefrontBuilder, REDIRECT_NOTICE};
