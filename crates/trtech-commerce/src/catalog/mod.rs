//! Product catalogue module.

mod product;
mod service;

pub use product::{Condition, Product, ProductFilter};
pub use service::Service;
