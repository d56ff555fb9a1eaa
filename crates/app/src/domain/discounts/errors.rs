//! Discounts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::discounts::models::DiscountRejection;

#[derive(Debug, Error)]
pub enum DiscountsServiceError {
    #[error("discount code not found")]
    NotFound,

    #[error("discount code is inactive")]
    Inactive,

    #[error("discount code is outside its activity window")]
    OutOfWindow,

    #[error("discount code already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for DiscountsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<DiscountRejection> for DiscountsServiceError {
    fn from(rejection: DiscountRejection) -> Self {
        match rejection {
            DiscountRejection::Inactive => Self::Inactive,
            DiscountRejection::OutOfWindow => Self::OutOfWindow,
        }
    }
}
