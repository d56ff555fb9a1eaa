//! Till
//!
//! Pure pricing computations for the till storefront core: line subtotals
//! and percentage discounts in integer minor units. No I/O, no clock, no
//! storage; everything here is deterministic and exhaustively unit-testable.

pub mod totals;

pub use totals::{LineItem, Totals, TotalsError, compute_totals};
