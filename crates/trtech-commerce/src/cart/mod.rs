//! Shopping cart module.
//!
//! [`CartState`] holds the lines; [`SharedCart`] shares one state across
//! every view of a session and reports changes as notices.

mod cart;
mod handle;

pub use cart::{CartChange, CartLineItem, CartState};
pub use handle::{cart_or_null, CartHandle, NullCart, SharedCart};
