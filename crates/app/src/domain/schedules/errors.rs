//! Schedules service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::schedules::status::ScheduleStatus;

#[derive(Debug, Error)]
pub enum SchedulesServiceError {
    #[error("a schedule already exists on this date")]
    AlreadyExists,

    #[error("schedule not found")]
    NotFound,

    #[error("order_start_at must be earlier than order_end_at")]
    InvalidOrderWindow,

    #[error("items cannot contain duplicated product_id")]
    DuplicateProduct,

    #[error("item.sales_limit is out of range")]
    InvalidSalesLimit,

    #[error("some products are invalid or inactive")]
    InvalidProducts,

    #[error("schedule already has orders and cannot be deleted")]
    HasOrders,

    #[error("status cannot change from {from} to {to}")]
    TransitionRejected {
        from: ScheduleStatus,
        to: ScheduleStatus,
    },

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SchedulesServiceError {
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
