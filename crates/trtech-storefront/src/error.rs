//! Storefront error types.

use thiserror::Error;
use trtech_api::ApiError;
use trtech_auth::AuthError;
use trtech_commerce::CommerceError;

use crate::handoff::HandoffError;

/// Errors from storefront operations.
///
/// Each error ends only the operation that raised it. The cart and the
/// checkout step are left as they were unless the variant says otherwise.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The order is recorded but the hand-off never opened.
    #[error("hand-off failed: {0}")]
    Handoff(#[from] HandoffError),

    /// A recorded order is waiting for its hand-off and its details are
    /// frozen until it goes out.
    #[error("an order is waiting to be sent; its details can no longer change")]
    HandoffPending,

    #[error("no hand-off is waiting to be retried")]
    NothingToRetry,

    #[error("checkout is closed")]
    Closed,
}

impl StorefrontError {
    /// Input the user can fix in place.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Commerce(err) => err.is_validation(),
            Self::Auth(err) => err.is_validation(),
            _ => false,
        }
    }

    /// A later retry may succeed without changing any input.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(err) => err.is_retryable(),
            Self::Handoff(_) => true,
            _ => false,
        }
    }
}
