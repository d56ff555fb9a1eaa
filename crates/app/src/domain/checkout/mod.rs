//! Checkout
//!
//! The coordinator that turns a mutable cart into an immutable order as a
//! single database transaction: cart rows are read under row locks, the
//! applied discount is re-validated, totals are computed on current prices,
//! and the order insert, inventory decrement, cart clear and discount clear
//! all commit together or not at all.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
