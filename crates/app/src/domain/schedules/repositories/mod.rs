//! Schedule Repositories

mod items;
mod schedules;

pub(crate) use items::{PgScheduleItemsRepository, ProductSnapshot};
pub(crate) use schedules::PgSchedulesRepository;

use sqlx::{Row, postgres::PgRow};

use crate::domain::schedules::status::ScheduleStatus;

pub(super) fn try_get_status(row: &PgRow, col: &str) -> Result<ScheduleStatus, sqlx::Error> {
    let status: &str = row.try_get(col)?;

    status.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
