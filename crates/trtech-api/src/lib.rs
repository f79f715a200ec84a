//! REST client for the TR-Tech backend.
//!
//! Covers products, services, orders, repairs, contact messages, and the
//! health check. Responses use the backend's `{success, data, message}`
//! envelope; see [`envelope::decode`].
//!
//! # Example
//!
//! ```rust,no_run
//! use trtech_api::{ApiClient, ApiConfig};
//! use trtech_commerce::catalog::ProductFilter;
//!
//! # async fn run() -> Result<(), trtech_api::ApiError> {
//! let client = ApiClient::new(ApiConfig::from_env()?)?;
//! let filter = ProductFilter::from_selection("cables", "all");
//! for product in client.list_products(&filter).await? {
//!     println!("{} {}", product.name, product.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod admin;
mod catalog;
mod client;
mod config;
mod contact;
pub mod envelope;
mod error;
mod orders;
mod repairs;
pub mod retry;
mod timeout;

pub use admin::{OrderFilter, OrderStats, RepairFilter, RepairStats};
pub use client::ApiClient;
pub use config::{ApiConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use contact::Health;
pub use error::{ApiError, DEFAULT_ERROR_MESSAGE};
pub use orders::OrderBackend;
pub use retry::{BackoffStrategy, RetryPolicy, Retryable};
pub use timeout::TimeoutConfig;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiConfig, ApiError, OrderBackend, RetryPolicy};
}
