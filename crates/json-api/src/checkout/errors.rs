//! Errors

use salvo::http::StatusError;
use tracing::error;

use till_app::domain::checkout::CheckoutServiceError;

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::EmptyCart => StatusError::conflict().brief("Cart is empty"),
        CheckoutServiceError::InsufficientInventory => {
            StatusError::conflict().brief("Insufficient inventory")
        }
        CheckoutServiceError::Conflict => {
            StatusError::conflict().brief("Checkout conflicted with another request; try again")
        }
        CheckoutServiceError::Pricing(source) => {
            error!("failed to price checkout: {source}");

            StatusError::internal_server_error()
        }
        CheckoutServiceError::Sql(source) => {
            error!("checkout storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
