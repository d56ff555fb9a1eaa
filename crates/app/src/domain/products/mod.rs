//! Products
//!
//! The narrow catalog surface the checkout core depends on: current price
//! and inventory for a product. Browsing and search live elsewhere.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
