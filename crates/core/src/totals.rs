//! Order totals
//!
//! Amounts are integer minor units (pence/cents). Percentage arithmetic is
//! done in [`Decimal`] and rounded half-up (`MidpointAwayFromZero`) to whole
//! minor units; that rounding rule is part of the contract and applied
//! uniformly everywhere a percentage is turned into money.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

/// Errors that can occur while computing totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalsError {
    /// An amount does not fit in 64-bit minor units.
    #[error("amount overflows the representable range")]
    Overflow,

    /// The discount percentage is outside the closed range [0, 100].
    #[error("discount percentage must be between 0 and 100")]
    PercentOutOfRange,
}

/// A cart line reduced to what pricing needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    /// Unit price in minor units.
    pub unit_price: u64,

    /// Number of units.
    pub quantity: u32,
}

/// Computed totals for a cart or order, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of `unit_price x quantity` over all lines.
    pub subtotal: u64,

    /// Discount amount subtracted from the subtotal.
    pub discount: u64,

    /// Amount payable: `subtotal - discount`.
    pub total: u64,
}

impl Totals {
    /// Totals for an empty set of lines.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            subtotal: 0,
            discount: 0,
            total: 0,
        }
    }
}

/// Computes subtotal, discount amount and payable total for a set of lines.
///
/// The discount is `subtotal x percent / 100`, rounded half-up to whole
/// minor units and clamped to the subtotal, so the total can never go
/// negative. An empty slice yields [`Totals::zero`].
///
/// # Errors
///
/// - [`TotalsError::Overflow`]: the subtotal or discount does not fit in
///   64-bit minor units.
/// - [`TotalsError::PercentOutOfRange`]: `percent` is negative or above 100.
pub fn compute_totals(
    lines: &[LineItem],
    percent: Option<Decimal>,
) -> Result<Totals, TotalsError> {
    let subtotal = lines.iter().try_fold(0_u64, |acc, line| {
        u64::from(line.quantity)
            .checked_mul(line.unit_price)
            .and_then(|line_total| acc.checked_add(line_total))
            .ok_or(TotalsError::Overflow)
    })?;

    let discount = match percent {
        Some(percent) => discount_amount(subtotal, percent)?,
        None => 0,
    };

    Ok(Totals {
        subtotal,
        discount,
        total: subtotal - discount,
    })
}

/// Discount on `subtotal` for a percentage, clamped to the subtotal.
fn discount_amount(subtotal: u64, percent: Decimal) -> Result<u64, TotalsError> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(TotalsError::PercentOutOfRange);
    }

    let fraction = percent / Decimal::ONE_HUNDRED;

    let Some(raw) = Decimal::from(subtotal).checked_mul(fraction) else {
        return Err(TotalsError::Overflow);
    };

    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let Some(amount) = rounded.to_u64() else {
        return Err(TotalsError::Overflow);
    };

    Ok(amount.min(subtotal))
}
