//! Order Responses

use jiff::tz::TimeZone;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakelink_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{extensions::*, pagination::PaginationResponse};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: Uuid,

    pub schedule_id: Uuid,

    /// Date of the schedule the order was placed against
    pub schedule_date: String,

    pub status: String,

    pub customer_name: String,

    pub customer_phone: String,

    pub payment_method: String,

    pub pickup_time: String,

    pub note: Option<String>,

    /// Sum of the line totals in minor currency units
    pub total_amount: u64,

    /// Empty in list results
    pub items: Vec<OrderItemResponse>,

    pub created_at: String,

    pub updated_at: String,
}

impl OrderResponse {
    pub(crate) fn render(order: OrderRecord, time_zone: &TimeZone) -> Self {
        Self {
            id: order.uuid.into(),
            schedule_id: order.schedule_uuid.into(),
            schedule_date: order.schedule_date.to_string(),
            status: order.status.to_string(),
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            payment_method: order.payment_method,
            pickup_time: order.pickup_time.render_in(time_zone),
            note: order.note,
            total_amount: order.total_amount,
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemResponse::render(item, time_zone))
                .collect(),
            created_at: order.created_at.render_in(time_zone),
            updated_at: order.updated_at.render_in(time_zone),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub id: Uuid,

    /// `null` once the schedule's items have been replaced
    pub schedule_item_id: Option<Uuid>,

    pub product_id: Uuid,

    pub product_name: String,

    pub unit_price: u64,

    pub quantity: u32,

    pub line_total: u64,

    pub created_at: String,
}

impl OrderItemResponse {
    fn render(item: OrderItemRecord, time_zone: &TimeZone) -> Self {
        Self {
            id: item.uuid.into(),
            schedule_item_id: item.schedule_item_uuid.map(Into::into),
            product_id: item.product_uuid.into(),
            product_name: item.product_name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total,
            created_at: item.created_at.render_in(time_zone),
        }
    }
}

/// Paginated order list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub data: Vec<OrderResponse>,

    pub pagination: PaginationResponse,
}
