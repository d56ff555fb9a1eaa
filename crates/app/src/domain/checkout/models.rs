//! Checkout Models

use rust_decimal::Decimal;
use till::Totals;

use crate::domain::{
    carts::models::CartLine,
    discounts::models::{DiscountRejection, DiscountRule, DiscountRuleUuid},
    orders::models::OrderUuid,
};

/// Discount information attached to a priced cart or a committed order.
#[derive(Debug, Clone)]
pub struct AppliedDiscount {
    pub uuid: DiscountRuleUuid,
    pub code: String,
    pub discount_percent: Decimal,
}

impl From<&DiscountRule> for AppliedDiscount {
    fn from(rule: &DiscountRule) -> Self {
        Self {
            uuid: rule.uuid,
            code: rule.code.clone(),
            discount_percent: rule.discount_percent,
        }
    }
}

/// A discount that was applied earlier but no longer held when the cart was
/// priced. Pricing proceeds undiscounted and reports it rather than failing.
#[derive(Debug, Clone)]
pub struct DroppedDiscount {
    pub code: String,
    pub reason: DiscountRejection,
}

/// Priced view of the user's cart before committing.
#[derive(Debug, Clone)]
pub struct CheckoutPreview {
    pub lines: Vec<CartLine>,
    pub totals: Totals,
    pub discount: Option<AppliedDiscount>,
    pub dropped_discount: Option<DroppedDiscount>,
}

/// The result of a committed checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub order_uuid: OrderUuid,
    pub totals: Totals,
    pub discount: Option<AppliedDiscount>,
    pub dropped_discount: Option<DroppedDiscount>,
}
