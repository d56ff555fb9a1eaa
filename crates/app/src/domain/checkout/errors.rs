//! Checkout service errors.

use sqlx::Error;
use thiserror::Error;
use till::TotalsError;

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    /// Nothing to check out. No writes are performed.
    #[error("cart is empty")]
    EmptyCart,

    /// A line's quantity exceeds the product's remaining stock; the whole
    /// transaction is rolled back.
    #[error("insufficient inventory")]
    InsufficientInventory,

    /// The transaction lost a race with a concurrent request and can be
    /// retried by the caller. Never retried internally.
    #[error("checkout conflicted with a concurrent request")]
    Conflict,

    #[error("pricing error")]
    Pricing(#[from] TotalsError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        // serialization_failure, deadlock_detected, lock_not_available
        if let Some(db) = error.as_database_error()
            && matches!(db.code().as_deref(), Some("40001" | "40P01" | "55P03"))
        {
            return Self::Conflict;
        }

        Self::Sql(error)
    }
}
