//! Discount Rule Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Discount rule UUID
pub type DiscountRuleUuid = TypedUuid<DiscountRule>;

/// A percentage discount code.
///
/// A rule is either time-gated with both `starts_at` and `ends_at` set, or
/// not gated at all; the schema rejects half-open windows.
#[derive(Debug, Clone)]
pub struct DiscountRule {
    pub uuid: DiscountRuleUuid,
    pub code: String,
    /// Percentage in the closed range [0, 100], two decimal places.
    pub discount_percent: Decimal,
    pub min_quantity: Option<u32>,
    pub active: bool,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Reasons a rule does not apply at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiscountRejection {
    /// The rule has been deactivated.
    #[error("discount code is inactive")]
    Inactive,

    /// The rule is time-gated and the given instant falls outside the window.
    #[error("discount code is outside its activity window")]
    OutOfWindow,
}

impl DiscountRule {
    /// Checks whether the rule applies at `now`: the active flag first, then
    /// the inclusive `[starts_at, ends_at]` window when the rule is gated.
    ///
    /// # Errors
    ///
    /// Returns the reason the rule does not apply.
    pub fn check_valid_at(&self, now: Timestamp) -> Result<(), DiscountRejection> {
        if !self.active {
            return Err(DiscountRejection::Inactive);
        }

        if let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at)
            && (now < starts_at || now > ends_at)
        {
            return Err(DiscountRejection::OutOfWindow);
        }

        Ok(())
    }
}

/// New Discount Rule Model
#[derive(Debug, Clone)]
pub struct NewDiscountRule {
    pub uuid: DiscountRuleUuid,
    pub code: String,
    pub discount_percent: Decimal,
    pub min_quantity: Option<u32>,
    pub active: bool,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}
