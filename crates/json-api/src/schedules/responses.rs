//! Schedule Responses

use jiff::tz::TimeZone;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakelink_app::domain::schedules::records::{
    ScheduleItemRecord, ScheduleRecord, ScheduleSummaryRecord,
};

use crate::{extensions::*, pagination::PaginationResponse};

/// Schedule Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ScheduleResponse {
    pub id: Uuid,

    /// Calendar date, `YYYY-MM-DD`
    pub schedule_date: String,

    pub status: String,

    pub order_start_at: String,

    pub order_end_at: String,

    pub note: Option<String>,

    /// Items in the order they were supplied
    pub items: Vec<ScheduleItemResponse>,

    pub created_at: String,

    pub updated_at: String,
}

impl ScheduleResponse {
    pub(crate) fn render(schedule: ScheduleRecord, time_zone: &TimeZone) -> Self {
        Self {
            id: schedule.uuid.into(),
            schedule_date: schedule.schedule_date.to_string(),
            status: schedule.status.to_string(),
            order_start_at: schedule.order_start_at.render_in(time_zone),
            order_end_at: schedule.order_end_at.render_in(time_zone),
            note: schedule.note,
            items: schedule
                .items
                .into_iter()
                .map(|item| ScheduleItemResponse::render(item, time_zone))
                .collect(),
            created_at: schedule.created_at.render_in(time_zone),
            updated_at: schedule.updated_at.render_in(time_zone),
        }
    }
}

/// Schedule Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ScheduleItemResponse {
    pub id: Uuid,

    pub product_id: Uuid,

    /// Product name when the item was written
    pub product_name: String,

    /// Product price when the item was written
    pub unit_price: u64,

    /// `null` when unlimited
    pub sales_limit: Option<u32>,

    pub created_at: String,

    pub updated_at: String,
}

impl ScheduleItemResponse {
    fn render(item: ScheduleItemRecord, time_zone: &TimeZone) -> Self {
        Self {
            id: item.uuid.into(),
            product_id: item.product_uuid.into(),
            product_name: item.product_name,
            unit_price: item.unit_price,
            sales_limit: item.sales_limit,
            created_at: item.created_at.render_in(time_zone),
            updated_at: item.updated_at.render_in(time_zone),
        }
    }
}

/// Schedule list entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ScheduleSummaryResponse {
    pub id: Uuid,

    pub schedule_date: String,

    pub status: String,

    pub order_start_at: String,

    pub order_end_at: String,

    pub note: Option<String>,

    /// Number of items on the schedule
    pub item_count: u64,

    /// Number of orders placed against the schedule, in any status
    pub order_count: u64,

    pub created_at: String,

    pub updated_at: String,
}

impl ScheduleSummaryResponse {
    pub(crate) fn render(summary: ScheduleSummaryRecord, time_zone: &TimeZone) -> Self {
        Self {
            id: summary.uuid.into(),
            schedule_date: summary.schedule_date.to_string(),
            status: summary.status.to_string(),
            order_start_at: summary.order_start_at.render_in(time_zone),
            order_end_at: summary.order_end_at.render_in(time_zone),
            note: summary.note,
            item_count: summary.item_count,
            order_count: summary.order_count,
            created_at: summary.created_at.render_in(time_zone),
            updated_at: summary.updated_at.render_in(time_zone),
        }
    }
}

/// Paginated schedule list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SchedulesResponse {
    pub data: Vec<ScheduleSummaryResponse>,

    pub pagination: PaginationResponse,
}

/// Schedules in one month
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MonthSchedulesResponse {
    pub data: Vec<ScheduleSummaryResponse>,
}
