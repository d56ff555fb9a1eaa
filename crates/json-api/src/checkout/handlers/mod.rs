pub(crate) mod place;
pub(crate) mod preview;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::domain::checkout::models::{AppliedDiscount, DroppedDiscount};

/// Discount attached to a priced cart or order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountSummaryResponse {
    /// Rule UUID
    pub uuid: Uuid,

    /// Discount code
    pub code: String,

    /// Percentage off the subtotal
    pub discount_percent: String,
}

impl From<AppliedDiscount> for DiscountSummaryResponse {
    fn from(discount: AppliedDiscount) -> Self {
        Self {
            uuid: discount.uuid.into(),
            code: discount.code,
            discount_percent: discount.discount_percent.to_string(),
        }
    }
}

pub(crate) fn warning_for(dropped: Option<DroppedDiscount>) -> Option<String> {
    dropped.map(|dropped| format!("Discount code '{}' is no longer valid: {}", dropped.code, dropped.reason))
}

#[cfg(test)]
pub(crate) mod tests {
    use till::Totals;

    pub(crate) fn totals(subtotal: u64, discount: u64) -> Totals {
        Totals {
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }
}
