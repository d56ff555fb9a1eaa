//! Place Order Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    checkout::{
        errors::into_status_error,
        handlers::{DiscountSummaryResponse, warning_for},
    },
    extensions::*,
    state::State,
};

/// Checkout Receipt Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutReceiptResponse {
    /// The created order's UUID
    pub order_uuid: Uuid,

    /// Sum of unit price x quantity, in minor units
    pub subtotal: u64,

    /// Discount amount subtracted from the subtotal, in minor units
    pub discount_amount: u64,

    /// Amount charged, in minor units
    pub total_amount: u64,

    /// The discount applied to the order, if any
    pub discount: Option<DiscountSummaryResponse>,

    /// Set when a previously applied discount no longer held at checkout
    pub discount_warning: Option<String>,
}

/// Place Order Handler
///
/// Converts the caller's cart into an order. Either the order, its item
/// snapshots, the inventory decrement and the cart cleanup all commit, or
/// nothing does.
#[endpoint(
    tags("checkout"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::CONFLICT, description = "Empty cart, insufficient stock, or concurrent checkout"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutReceiptResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let receipt = state
        .app
        .checkout
        .checkout(identity.user, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    let order_uuid: Uuid = receipt.order_uuid.into();

    res.add_header(LOCATION, format!("/orders/{order_uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CheckoutReceiptResponse {
        order_uuid,
        subtotal: receipt.totals.subtotal,
        discount_amount: receipt.totals.discount,
        total_amount: receipt.totals.total,
        discount: receipt.discount.map(Into::into),
        discount_warning: warning_for(receipt.dropped_discount),
    }))
}
