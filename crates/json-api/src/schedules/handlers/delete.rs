//! Delete Schedule Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, schedules::errors::into_status_error, state::State};

/// Delete Schedule Handler
///
/// Only schedules without orders can be deleted.
#[endpoint(
    tags("schedules"),
    summary = "Delete Schedule",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Schedule deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Schedule not found"),
        (status_code = StatusCode::CONFLICT, description = "Schedule has orders"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    schedule: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    state
        .schedules
        .delete_schedule(owner, schedule.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
