//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::domain::carts::models::CartLine;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// One cart line with its current price.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Cart line UUID
    pub uuid: Uuid,

    /// Product UUID
    pub product_uuid: Uuid,

    /// Units of the product in the cart
    pub quantity: u32,

    /// Current unit price in minor units
    pub unit_price: u64,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            uuid: line.uuid.into(),
            product_uuid: line.product_uuid.into(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The cart lines
    pub items: Vec<CartLineResponse>,

    /// Sum of unit price x quantity over all lines, in minor units
    pub subtotal: u64,
}

/// Get Cart Handler
///
/// Returns the caller's cart lines and subtotal at current prices.
#[endpoint(tags("cart"), summary = "Get Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let lines = state
        .app
        .carts
        .list_cart(identity.user)
        .await
        .map_err(into_status_error)?;

    let items: Vec<till::LineItem> = lines.iter().copied().map(Into::into).collect();

    let totals = till::compute_totals(&items, None).or_500("failed to price cart")?;

    Ok(Json(CartResponse {
        items: lines.into_iter().map(Into::into).collect(),
        subtotal: totals.subtotal,
    }))
}
