//! Decrease Cart Item Quantity Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Decrease Cart Item Quantity Handler
///
/// Removes one unit from one of the caller's cart lines; the line is
/// deleted outright when the quantity would reach zero.
#[endpoint(
    tags("cart"),
    summary = "Decrease Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Quantity decreased"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    state
        .app
        .carts
        .adjust_quantity(identity.user, item.into_inner().into(), -1)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
