//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use bakelink_app::domain::orders::status::OrderStatus;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error, requests::UpdateOrderStatusRequest, responses::OrderResponse,
    },
    state::State,
};

/// Update Order Status Handler
///
/// Cancelling an order releases the capacity it held.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Status change rejected"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid status"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let status = OrderStatus::try_from(json.into_inner())?;

    let updated = state
        .orders
        .update_order_status(owner, order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderResponse::render(
        updated,
        &req.display_time_zone(),
    )))
}
