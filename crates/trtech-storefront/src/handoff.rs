//! Opening a deep link in a new context.

use async_trait::async_trait;
use thiserror::Error;
use trtech_api::Retryable;

/// Why a link could not be opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandoffError {
    /// No browser or launcher answered. Usually transient.
    #[error("could not open link: {0}")]
    Unavailable(String),

    /// The launcher refused the link itself. Retrying will not help.
    #[error("link refused: {0}")]
    Refused(String),
}

impl Retryable for HandoffError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Opens a hand-off URL, e.g. in a new browser tab.
#[async_trait]
pub trait HandoffOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<(), HandoffError>;
}

/// An order that was recorded but whose hand-off has not opened yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingHandoff {
    pub order: trtech_commerce::checkout::Order,
    pub url: String,
    /// Cart lines as they were when the order was recorded.
    pub items: Vec<trtech_commerce::cart::CartLineItem>,
    /// Hand-off rounds tried so far, each with its own retry budget.
    pub rounds: u32,
}
