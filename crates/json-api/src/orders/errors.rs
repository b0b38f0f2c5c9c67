//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use bakelink_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::ScheduleNotFound => {
            StatusError::not_found().brief("Schedule not found")
        }
        OrdersServiceError::NotOpen => StatusError::conflict()
            .brief("Orders can only be created when schedule status is OPEN"),
        OrdersServiceError::SalesLimitExceeded => {
            StatusError::conflict().brief("Sales limit exceeded for one or more items")
        }
        OrdersServiceError::AlreadyExists | OrdersServiceError::TransitionRejected { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::ItemNotInSchedule => {
            StatusError::bad_request().brief("Some order items are not in schedule")
        }
        OrdersServiceError::EmptyItems
        | OrdersServiceError::InvalidQuantity
        | OrdersServiceError::BlankField(_)
        | OrdersServiceError::TotalOverflow => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
