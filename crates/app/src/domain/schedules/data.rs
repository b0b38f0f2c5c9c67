//! Schedule Data

use std::{fmt, num::NonZeroU32, str::FromStr};

use jiff::{Timestamp, civil::Date};
use thiserror::Error;

use crate::domain::{
    products::records::ProductUuid,
    schedules::{records::ScheduleUuid, status::ScheduleStatus},
};

/// New Schedule Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchedule {
    pub uuid: ScheduleUuid,
    pub schedule_date: Date,
    pub order_start_at: Timestamp,
    pub order_end_at: Timestamp,
    pub status: ScheduleStatus,
    pub note: Option<String>,
    pub items: Vec<NewScheduleItem>,
}

/// A product offered on a schedule, with an optional sales cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewScheduleItem {
    pub product_uuid: ProductUuid,
    pub sales_limit: Option<NonZeroU32>,
}

/// Partial schedule update.
///
/// `None` leaves a field unchanged. `note: Some(None)` clears the note and
/// `items: Some(vec![])` removes every item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleUpdate {
    pub schedule_date: Option<Date>,
    pub order_start_at: Option<Timestamp>,
    pub order_end_at: Option<Timestamp>,
    pub status: Option<ScheduleStatus>,
    pub note: Option<Option<String>>,
    pub items: Option<Vec<NewScheduleItem>>,
}

/// Schedule list filters.
///
/// An exact `date` replaces the other date filters. Otherwise `month` and the
/// `date_from`/`date_to` range are all applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub date: Option<Date>,
    pub month: Option<ScheduleMonth>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
    pub status: Option<ScheduleStatus>,
}

impl ScheduleFilter {
    /// Inclusive date bounds to query with.
    #[must_use]
    pub fn date_bounds(&self) -> (Option<Date>, Option<Date>) {
        if let Some(date) = self.date {
            return (Some(date), Some(date));
        }

        let Some(month) = self.month else {
            return (self.date_from, self.date_to);
        };

        let from = self
            .date_from
            .map_or(month.first_day(), |from| from.max(month.first_day()));

        let to = self
            .date_to
            .map_or(month.last_day(), |to| to.min(month.last_day()));

        (Some(from), Some(to))
    }
}

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleMonth {
    first_day: Date,
}

impl ScheduleMonth {
    #[must_use]
    pub fn first_day(self) -> Date {
        self.first_day
    }

    #[must_use]
    pub fn last_day(self) -> Date {
        self.first_day.last_of_month()
    }
}

impl fmt::Display for ScheduleMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}",
            self.first_day.year(),
            self.first_day.month()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("month must be in YYYY-MM format")]
pub struct InvalidScheduleMonth;

impl FromStr for ScheduleMonth {
    type Err = InvalidScheduleMonth;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (year, month) = value.split_once('-').ok_or(InvalidScheduleMonth)?;

        if year.len() != 4 || month.len() != 2 {
            return Err(InvalidScheduleMonth);
        }

        let year: i16 = year.parse().map_err(|_| InvalidScheduleMonth)?;
        let month: i8 = month.parse().map_err(|_| InvalidScheduleMonth)?;

        let first_day = Date::new(year, month, 1).map_err(|_| InvalidScheduleMonth)?;

        Ok(Self { first_day })
    }
}
