//! Schedule Records

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{products::records::ProductUuid, schedules::status::ScheduleStatus},
    uuids::TypedUuid,
};

/// Schedule UUID
pub type ScheduleUuid = TypedUuid<ScheduleRecord>;

/// Schedule Record
#[derive(Debug, Clone)]
pub struct ScheduleRecord {
    pub uuid: ScheduleUuid,
    pub schedule_date: Date,
    pub status: ScheduleStatus,
    pub order_start_at: Timestamp,
    pub order_end_at: Timestamp,
    pub note: Option<String>,
    pub items: Vec<ScheduleItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Schedule Item UUID
pub type ScheduleItemUuid = TypedUuid<ScheduleItemRecord>;

/// Schedule Item Record
///
/// `product_name` and `unit_price` are copied from the product when the item
/// is written and never follow later catalog changes.
#[derive(Debug, Clone)]
pub struct ScheduleItemRecord {
    pub uuid: ScheduleItemUuid,
    pub schedule_uuid: ScheduleUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_price: u64,
    pub sales_limit: Option<u32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Schedule list row with item and order counts.
#[derive(Debug, Clone)]
pub struct ScheduleSummaryRecord {
    pub uuid: ScheduleUuid,
    pub schedule_date: Date,
    pub status: ScheduleStatus,
    pub order_start_at: Timestamp,
    pub order_end_at: Timestamp,
    pub note: Option<String>,
    pub item_count: u64,
    pub order_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
