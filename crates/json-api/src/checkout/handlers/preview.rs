//! Checkout Preview Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::get::CartLineResponse,
    checkout::{
        errors::into_status_error,
        handlers::{DiscountSummaryResponse, warning_for},
    },
    extensions::*,
    state::State,
};

/// Checkout Preview Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutPreviewResponse {
    /// The cart lines being priced
    pub items: Vec<CartLineResponse>,

    /// Sum of unit price x quantity, in minor units
    pub subtotal: u64,

    /// Discount amount subtracted from the subtotal, in minor units
    pub discount_amount: u64,

    /// Amount payable, in minor units
    pub total_amount: u64,

    /// The discount that will apply, if any
    pub discount: Option<DiscountSummaryResponse>,

    /// Set when a previously applied discount no longer holds
    pub discount_warning: Option<String>,
}

/// Checkout Preview Handler
///
/// Prices the caller's cart at current prices with the applied discount
/// re-validated, without committing anything.
#[endpoint(
    tags("checkout"),
    summary = "Checkout Preview",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<CheckoutPreviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let preview = state
        .app
        .checkout
        .preview(identity.user, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CheckoutPreviewResponse {
        items: preview.lines.into_iter().map(Into::into).collect(),
        subtotal: preview.totals.subtotal,
        discount_amount: preview.totals.discount,
        total_amount: preview.totals.total,
        discount: preview.discount.map(Into::into),
        discount_warning: warning_for(preview.dropped_discount),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use till_app::domain::{
        carts::models::{CartItemUuid, CartLine},
        checkout::{MockCheckoutService, models::CheckoutPreview},
        discounts::models::DiscountRejection,
        products::models::ProductUuid,
    };
    use till_app::domain::checkout::models::DroppedDiscount;

    use crate::test_helpers::{TEST_USER_UUID, checkout_service};

    use super::{super::tests::totals, *};

    fn make_service(checkout: MockCheckoutService) -> Service {
        checkout_service(checkout, Router::with_path("checkout").get(handler))
    }

    #[tokio::test]
    async fn test_preview_returns_totals() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_preview()
            .once()
            .withf(|user, _now| *user == TEST_USER_UUID)
            .return_once(|_, _| {
                Ok(CheckoutPreview {
                    lines: vec![CartLine {
                        uuid: CartItemUuid::new(),
                        product_uuid: ProductUuid::new(),
                        quantity: 2,
                        unit_price: 10_00,
                    }],
                    totals: totals(20_00, 2_00),
                    discount: None,
                    dropped_discount: None,
                })
            });

        let mut res = TestClient::get("http://example.com/checkout")
            .send(&make_service(checkout))
            .await;

        let body: CheckoutPreviewResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.subtotal, 20_00);
        assert_eq!(body.discount_amount, 2_00);
        assert_eq!(body.total_amount, 18_00);
        assert!(body.discount_warning.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_surfaces_dropped_discount_warning() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_preview().once().return_once(|_, _| {
            Ok(CheckoutPreview {
                lines: Vec::new(),
                totals: totals(0, 0),
                discount: None,
                dropped_discount: Some(DroppedDiscount {
                    code: "FLASH".to_string(),
                    reason: DiscountRejection::Inactive,
                }),
            })
        });

        let mut res = TestClient::get("http://example.com/checkout")
            .send(&make_service(checkout))
            .await;

        let body: CheckoutPreviewResponse = res.take_json().await?;

        let warning = body.discount_warning.unwrap_or_default();

        assert!(warning.contains("FLASH"), "warning should name the code: {warning}");

        Ok(())
    }
}
