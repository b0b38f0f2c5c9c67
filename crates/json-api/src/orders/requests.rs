//! Order Requests

use std::num::NonZeroU32;

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use bakelink_app::domain::orders::{
    data::{NewOrder, NewOrderLine, OrderLineTarget},
    records::OrderUuid,
    status::OrderStatus,
};

use crate::extensions::parse_datetime;

/// A requested order line.
///
/// Name the line by `schedule_item_id` or by `product_id`; the schedule item
/// wins when both are given.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    #[serde(default)]
    pub schedule_item_id: Option<Uuid>,

    #[serde(default)]
    pub product_id: Option<Uuid>,

    /// Units to order, at least 1
    pub quantity: u32,
}

impl TryFrom<OrderItemRequest> for NewOrderLine {
    type Error = StatusError;

    fn try_from(request: OrderItemRequest) -> Result<Self, Self::Error> {
        let target = OrderLineTarget::from_ids(
            request.schedule_item_id.map(Into::into),
            request.product_id.map(Into::into),
        )
        .ok_or_else(|| {
            StatusError::bad_request().brief("item.schedule_item_id or item.product_id is required")
        })?;

        let quantity = NonZeroU32::new(request.quantity).ok_or_else(|| {
            StatusError::bad_request().brief("item.quantity must be a positive integer")
        })?;

        Ok(Self { target, quantity })
    }
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Schedule to order from; must be `OPEN`
    pub schedule_id: Uuid,

    pub customer_name: String,

    pub customer_phone: String,

    /// ISO-8601, UTC when no offset is given
    pub pickup_time: String,

    pub payment_method: String,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = StatusError;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        let items = request
            .items
            .into_iter()
            .map(NewOrderLine::try_from)
            .collect::<Result<SmallVec<_>, _>>()?;

        Ok(Self {
            uuid: OrderUuid::new(),
            schedule_uuid: request.schedule_id.into(),
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            payment_method: request.payment_method,
            pickup_time: parse_datetime(&request.pickup_time, "pickup_time")?,
            note: request.note,
            items,
        })
    }
}

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// `PLACED`, `COMPLETED` or `CANCELLED`
    pub status: String,
}

impl TryFrom<UpdateOrderStatusRequest> for OrderStatus {
    type Error = StatusError;

    fn try_from(request: UpdateOrderStatusRequest) -> Result<Self, Self::Error> {
        request
            .status
            .parse::<OrderStatus>()
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))
    }
}
