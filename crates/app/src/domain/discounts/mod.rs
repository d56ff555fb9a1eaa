//! Discounts
//!
//! Percentage discount codes with an optional activity window, and the
//! per-user applied-discount reference that checkout re-validates and
//! clears. Validity is checked both when a code is applied and again at
//! checkout time, since flags and windows can change in between.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::DiscountsServiceError;
pub use service::*;
