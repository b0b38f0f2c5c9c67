//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::orders::status::OrderStatus;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("schedule not found")]
    ScheduleNotFound,

    #[error("orders can only be created when schedule status is OPEN")]
    NotOpen,

    #[error("some order items are not in schedule")]
    ItemNotInSchedule,

    #[error("sales limit exceeded for one or more items")]
    SalesLimitExceeded,

    #[error("items is required and must not be empty")]
    EmptyItems,

    #[error("item.quantity is out of range")]
    InvalidQuantity,

    #[error("{0} is required")]
    BlankField(&'static str),

    #[error("order total is out of range")]
    TotalOverflow,

    #[error("status cannot change from {from} to {to}")]
    TransitionRejected { from: OrderStatus, to: OrderStatus },

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
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
