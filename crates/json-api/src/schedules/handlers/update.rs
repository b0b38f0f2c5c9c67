//! Update Schedule Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use bakelink_app::domain::schedules::data::ScheduleUpdate;

use crate::{
    extensions::*,
    schedules::{
        errors::into_status_error, requests::UpdateScheduleRequest, responses::ScheduleResponse,
    },
    state::State,
};

/// Update Schedule Handler
///
/// Supplying `items` replaces every existing item, and an empty list removes
/// them all.
#[endpoint(
    tags("schedules"),
    summary = "Update Schedule",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Schedule updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Schedule not found"),
        (status_code = StatusCode::CONFLICT, description = "Date taken or status change rejected"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "schedules.update",
    skip(schedule, json, req, depot),
    fields(owner_uuid = tracing::field::Empty, schedule_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    schedule: PathParam<Uuid>,
    json: JsonBody<UpdateScheduleRequest>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ScheduleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;
    let schedule = schedule.into_inner();

    let span = tracing::Span::current();

    span.record("owner_uuid", tracing::field::display(owner));
    span.record("schedule_uuid", tracing::field::display(schedule));

    let update = ScheduleUpdate::try_from(json.into_inner())?;

    let updated = state
        .schedules
        .update_schedule(owner, schedule.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ScheduleResponse::render(
        updated,
        &req.display_time_zone(),
    )))
}

#[cfg(test)]
mod tests {
    use bakelink_app::domain::schedules::{
        MockSchedulesService, SchedulesServiceError, records::ScheduleUuid,
        status::ScheduleStatus,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_OWNER_UUID, make_schedule, schedules_service};

    use super::*;

    fn make_service(schedules: MockSchedulesService) -> Service {
        schedules_service(
            schedules,
            Router::with_path("schedules/{schedule}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_schedule_sends_only_supplied_fields() -> TestResult {
        let uuid = ScheduleUuid::new();
        let mut schedules = MockSchedulesService::new();

        schedules
            .expect_update_schedule()
            .once()
            .withf(move |owner, schedule, update| {
                *owner == TEST_OWNER_UUID
                    && *schedule == uuid
                    && update.status == Some(ScheduleStatus::Closed)
                    && update.note == Some(None)
                    && update.order_end_at.is_none()
                    && update.items.is_none()
                    && update.schedule_date.is_none()
            })
            .return_once(|_, schedule, _| {
                let mut record = make_schedule(schedule);
                record.status = ScheduleStatus::Closed;
                Ok(record)
            });

        let response: ScheduleResponse =
            TestClient::put(format!("http://example.com/schedules/{uuid}"))
                .json(&json!({ "status": "CLOSED", "note": " ", "order_end_at": null }))
                .send(&make_service(schedules))
                .await
                .take_json()
                .await?;

        assert_eq!(response.id, uuid.into_uuid());
        assert_eq!(response.status, "CLOSED");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_schedule_rejected_transition_returns_409() {
        let mut schedules = MockSchedulesService::new();

        schedules.expect_update_schedule().once().return_once(|_, _, _| {
            Err(SchedulesServiceError::TransitionRejected {
                from: ScheduleStatus::Fulfilled,
                to: ScheduleStatus::Draft,
            })
        });

        let res = TestClient::put(format!(
            "http://example.com/schedules/{}",
            ScheduleUuid::new()
        ))
        .json(&json!({ "status": "DRAFT" }))
        .send(&make_service(schedules))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_update_schedule_unknown_returns_404() {
        let mut schedules = MockSchedulesService::new();

        schedules
            .expect_update_schedule()
            .once()
            .return_once(|_, _, _| Err(SchedulesServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/schedules/{}",
            ScheduleUuid::new()
        ))
        .json(&json!({ "note": "Closed for holidays" }))
        .send(&make_service(schedules))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_update_schedule_invalid_status_returns_400() {
        let res = TestClient::put(format!(
            "http://example.com/schedules/{}",
            ScheduleUuid::new()
        ))
        .json(&json!({ "status": "PAUSED" }))
        .send(&make_service(MockSchedulesService::new()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
