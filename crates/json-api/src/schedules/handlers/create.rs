//! Create Schedule Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use bakelink_app::domain::schedules::data::NewSchedule;

use crate::{
    extensions::*,
    schedules::{
        errors::into_status_error, requests::CreateScheduleRequest, responses::ScheduleResponse,
    },
    state::State,
};

/// Create Schedule Handler
///
/// Items copy the current name and price of each product. Every product must
/// be active and belong to the caller.
#[endpoint(
    tags("schedules"),
    summary = "Create Schedule",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Schedule created"),
        (status_code = StatusCode::CONFLICT, description = "A schedule already exists on this date"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateScheduleRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ScheduleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let schedule = NewSchedule::try_from(json.into_inner())?;

    let created = state
        .schedules
        .create_schedule(owner, schedule)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/schedules/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ScheduleResponse::render(
        created,
        &req.display_time_zone(),
    )))
}
