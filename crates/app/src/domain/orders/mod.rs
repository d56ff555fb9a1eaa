//! Orders
//!
//! The immutable record a checkout leaves behind. Orders and their items
//! are append-only; the only mutation ever allowed is a forward status
//! transition performed by the fulfilment process.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
