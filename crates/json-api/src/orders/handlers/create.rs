//! Create Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use bakelink_app::domain::orders::data::NewOrder;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, requests::CreateOrderRequest, responses::OrderResponse},
    state::State,
};

/// Create Order Handler
///
/// Places an order against an `OPEN` schedule. Either every line fits within
/// its sales limit and the order is stored, or nothing is stored.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::NOT_FOUND, description = "Schedule not found"),
        (status_code = StatusCode::CONFLICT, description = "Schedule not open or sales limit exceeded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, req, depot, res),
    fields(owner_uuid = tracing::field::Empty, schedule_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let order = NewOrder::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("owner_uuid", tracing::field::display(owner));
    span.record("schedule_uuid", tracing::field::display(order.schedule_uuid));

    let created = state
        .orders
        .create_order(owner, order)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderResponse::render(
        created,
        &req.display_time_zone(),
    )))
}
