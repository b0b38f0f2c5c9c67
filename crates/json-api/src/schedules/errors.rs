//! Schedule Errors

use salvo::http::StatusError;
use tracing::error;

use bakelink_app::domain::schedules::SchedulesServiceError;

pub(crate) fn into_status_error(error: SchedulesServiceError) -> StatusError {
    match error {
        SchedulesServiceError::NotFound => StatusError::not_found().brief("Schedule not found"),
        SchedulesServiceError::AlreadyExists
        | SchedulesServiceError::HasOrders
        | SchedulesServiceError::TransitionRejected { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        SchedulesServiceError::InvalidOrderWindow
        | SchedulesServiceError::DuplicateProduct
        | SchedulesServiceError::InvalidSalesLimit
        | SchedulesServiceError::InvalidProducts => {
            StatusError::bad_request().brief(error.to_string())
        }
        SchedulesServiceError::InvalidReference => {
            StatusError::bad_request().brief("Some products are invalid or inactive")
        }
        SchedulesServiceError::MissingRequiredData | SchedulesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid schedule payload")
        }
        SchedulesServiceError::Sql(source) => {
            error!("schedule storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use bakelink_app::domain::schedules::status::ScheduleStatus;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn conflicts_map_to_409() {
        for error in [
            SchedulesServiceError::AlreadyExists,
            SchedulesServiceError::HasOrders,
            SchedulesServiceError::TransitionRejected {
                from: ScheduleStatus::Closed,
                to: ScheduleStatus::Open,
            },
        ] {
            assert_eq!(into_status_error(error).code, StatusCode::CONFLICT);
        }
    }

    #[test]
    fn validation_failures_map_to_400() {
        for error in [
            SchedulesServiceError::InvalidOrderWindow,
            SchedulesServiceError::DuplicateProduct,
            SchedulesServiceError::InvalidSalesLimit,
            SchedulesServiceError::InvalidProducts,
            SchedulesServiceError::InvalidReference,
        ] {
            assert_eq!(into_status_error(error).code, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn storage_failure_hides_detail() {
        let status = into_status_error(SchedulesServiceError::Sql(sqlx::Error::PoolTimedOut));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
