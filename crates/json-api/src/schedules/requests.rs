//! Schedule Requests

use std::num::NonZeroU32;

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakelink_app::domain::schedules::{
    data::{NewSchedule, NewScheduleItem, ScheduleUpdate},
    records::ScheduleUuid,
    status::ScheduleStatus,
};

use crate::extensions::{parse_date, parse_datetime};

/// A product to offer on the schedule.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ScheduleItemRequest {
    /// Product to offer
    pub product_id: Uuid,

    /// Maximum units sold across open orders; omitted or null for unlimited
    #[serde(default)]
    pub sales_limit: Option<u32>,
}

impl TryFrom<ScheduleItemRequest> for NewScheduleItem {
    type Error = StatusError;

    fn try_from(request: ScheduleItemRequest) -> Result<Self, Self::Error> {
        let sales_limit = request
            .sales_limit
            .map(|limit| {
                NonZeroU32::new(limit).ok_or_else(|| {
                    StatusError::bad_request().brief("item.sales_limit must be a positive integer")
                })
            })
            .transpose()?;

        Ok(Self {
            product_uuid: request.product_id.into(),
            sales_limit,
        })
    }
}

/// Create Schedule Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateScheduleRequest {
    /// Calendar date, `YYYY-MM-DD`
    pub schedule_date: String,

    /// When ordering opens; ISO-8601, UTC when no offset is given
    pub order_start_at: String,

    /// When ordering closes; ISO-8601, UTC when no offset is given
    pub order_end_at: String,

    /// Initial status; defaults to `DRAFT`
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(default)]
    pub items: Vec<ScheduleItemRequest>,
}

impl TryFrom<CreateScheduleRequest> for NewSchedule {
    type Error = StatusError;

    fn try_from(request: CreateScheduleRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: ScheduleUuid::new(),
            schedule_date: parse_date(&request.schedule_date, "schedule_date")?,
            order_start_at: parse_datetime(&request.order_start_at, "order_start_at")?,
            order_end_at: parse_datetime(&request.order_end_at, "order_end_at")?,
            status: parse_status(request.status.as_deref())?.unwrap_or_default(),
            note: request.note.as_deref().and_then(non_blank),
            items: items(request.items)?,
        })
    }
}

/// Update Schedule Request
///
/// Omitted or null fields keep their value. Sending `items` replaces the whole
/// item set and a blank `note` clears the note.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateScheduleRequest {
    #[serde(default)]
    pub schedule_date: Option<String>,

    #[serde(default)]
    pub order_start_at: Option<String>,

    #[serde(default)]
    pub order_end_at: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(default)]
    pub items: Option<Vec<ScheduleItemRequest>>,
}

impl TryFrom<UpdateScheduleRequest> for ScheduleUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateScheduleRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            schedule_date: request
                .schedule_date
                .map(|raw| parse_date(&raw, "schedule_date"))
                .transpose()?,
            order_start_at: request
                .order_start_at
                .map(|raw| parse_datetime(&raw, "order_start_at"))
                .transpose()?,
            order_end_at: request
                .order_end_at
                .map(|raw| parse_datetime(&raw, "order_end_at"))
                .transpose()?,
            status: parse_status(request.status.as_deref())?,
            note: request.note.map(|raw| non_blank(&raw)),
            items: request.items.map(items).transpose()?,
        })
    }
}

/// Trimmed text, or `None` when nothing is left.
fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn parse_status(raw: Option<&str>) -> Result<Option<ScheduleStatus>, StatusError> {
    raw.map(|raw| {
        raw.parse::<ScheduleStatus>()
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))
    })
    .transpose()
}

fn items(requests: Vec<ScheduleItemRequest>) -> Result<Vec<NewScheduleItem>, StatusError> {
    requests.into_iter().map(NewScheduleItem::try_from).collect()
}
