//! Carts
//!
//! Per-user cart line items. At most one line exists per (user, product);
//! repeat adds fold into the quantity through an atomic upsert. Every
//! mutating operation is scoped to the owning user.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
