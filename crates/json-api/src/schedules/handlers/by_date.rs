//! Schedule By Date Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    schedules::{errors::into_status_error, responses::ScheduleResponse},
    state::State,
};

/// Schedule By Date Handler
///
/// Responds with `null` when nothing is scheduled on the date.
#[endpoint(
    tags("schedules"),
    summary = "Get Schedule By Date",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The schedule, or null"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid date"),
    ),
)]
pub(crate) async fn handler(
    date: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Option<ScheduleResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let date = parse_date(&date.into_inner(), "date")?;

    let schedule = state
        .schedules
        .get_schedule_by_date(owner, date)
        .await
        .map_err(into_status_error)?;

    let time_zone = req.display_time_zone();

    Ok(Json(schedule.map(|schedule| {
        ScheduleResponse::render(schedule, &time_zone)
    })))
}
