//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in shop and checkout operations.
///
/// Every variant is local to the operation that raised it. Nothing here
/// leaves the cart or the checkout flow in a changed state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Checkout or submission attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Required form fields were left empty.
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The checkout step does not accept this event.
    #[error("Cannot {event} from the {from} step")]
    InvalidTransition { from: &'static str, event: &'static str },

    /// An order submission is already in flight.
    #[error("Order submission already in progress")]
    SubmissionInProgress,

    /// The hand-off endpoint or contact handle is unusable.
    #[error("Invalid hand-off link: {0}")]
    InvalidLink(String),

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Unknown status or enum value.
    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}

impl CommerceError {
    /// Check if this is a form validation failure the user can fix in place.
    pub fn is_validation(&self) -> bool {
        matches!(self, CommerceError::EmptyCart | CommerceError::MissingFields(_))
    }
}
