//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use bakelink_app::domain::orders::{data::OrderFilter, status::OrderStatus};

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        responses::{OrderResponse, OrdersResponse},
    },
    pagination::pagination,
    state::State,
};

/// Order Index Handler
///
/// Newest orders first. Date filters apply to the schedule date.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders, newest first"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filter"),
    ),
)]
#[expect(clippy::too_many_arguments, reason = "one extractor per query parameter")]
pub(crate) async fn handler(
    schedule_id: QueryParam<Uuid, false>,
    status: QueryParam<String, false>,
    date_from: QueryParam<String, false>,
    date_to: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;
    let time_zone = req.display_time_zone();

    let status = status
        .into_non_blank()
        .map(|raw| raw.parse::<OrderStatus>())
        .transpose()
        .or_400("status must be one of PLACED, COMPLETED, CANCELLED")?;

    let filter = OrderFilter {
        schedule_uuid: schedule_id.into_inner().map(Into::into),
        status,
        date_from: date_from.into_date("date_from")?,
        date_to: date_to.into_date("date_to")?,
    };

    let orders = state
        .orders
        .list_orders(owner, filter, pagination(page, limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        data: orders
            .items
            .into_iter()
            .map(|order| OrderResponse::render(order, &time_zone))
            .collect(),
        pagination: orders.meta.into(),
    }))
}
