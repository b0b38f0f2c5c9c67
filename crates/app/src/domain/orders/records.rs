//! Order Records

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{
        orders::status::OrderStatus,
        products::records::ProductUuid,
        schedules::records::{ScheduleItemUuid, ScheduleUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
///
/// `items` is empty in list results.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub schedule_uuid: ScheduleUuid,
    pub schedule_date: Date,
    pub status: OrderStatus,
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_method: String,
    pub pickup_time: Timestamp,
    pub note: Option<String>,
    pub total_amount: u64,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
///
/// `schedule_item_uuid` becomes `None` once the schedule's item set is
/// replaced. The product fields are a snapshot taken when the order was placed.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub schedule_item_uuid: Option<ScheduleItemUuid>,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
    pub created_at: Timestamp,
}
