//! Schedules By Month Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use bakelink_app::domain::schedules::data::ScheduleMonth;

use crate::{
    extensions::*,
    schedules::{
        errors::into_status_error,
        requests::parse_status,
        responses::{MonthSchedulesResponse, ScheduleSummaryResponse},
    },
    state::State,
};

/// Schedules By Month Handler
///
/// Calendar view of every schedule in `YYYY-MM`, optionally narrowed by status.
#[endpoint(
    tags("schedules"),
    summary = "List Schedules In Month",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Schedules ordered by date"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid month or status"),
    ),
)]
pub(crate) async fn handler(
    month: PathParam<String>,
    status: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<MonthSchedulesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;
    let time_zone = req.display_time_zone();

    let month = month
        .into_inner()
        .parse::<ScheduleMonth>()
        .or_400("month must be YYYY-MM format")?;

    let status = parse_status(status.into_inner().as_deref())?;

    let schedules = state
        .schedules
        .list_schedules_by_month(owner, month, status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MonthSchedulesResponse {
        data: schedules
            .into_iter()
            .map(|summary| ScheduleSummaryResponse::render(summary, &time_zone))
            .collect(),
    }))
}
