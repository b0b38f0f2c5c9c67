//! Schedules Repository

use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    columns::try_get_count,
    pagination::Pagination,
    schedules::{
        data::{NewSchedule, ScheduleFilter},
        records::{ScheduleRecord, ScheduleSummaryRecord, ScheduleUuid},
        status::ScheduleStatus,
    },
};

use super::try_get_status;

const GET_SCHEDULE_SQL: &str = include_str!("../sql/get_schedule.sql");
const LOCK_SCHEDULE_SQL: &str = include_str!("../sql/lock_schedule.sql");
const GET_SCHEDULE_BY_DATE_SQL: &str = include_str!("../sql/get_schedule_by_date.sql");
const CREATE_SCHEDULE_SQL: &str = include_str!("../sql/create_schedule.sql");
const UPDATE_SCHEDULE_SQL: &str = include_str!("../sql/update_schedule.sql");
const DELETE_SCHEDULE_SQL: &str = include_str!("../sql/delete_schedule.sql");
const LIST_SCHEDULES_SQL: &str = include_str!("../sql/list_schedules.sql");
const COUNT_SCHEDULES_SQL: &str = include_str!("../sql/count_schedules.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSchedulesRepository;

impl PgSchedulesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_schedule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleUuid,
    ) -> Result<ScheduleRecord, sqlx::Error> {
        query_as::<Postgres, ScheduleRecord>(GET_SCHEDULE_SQL)
            .bind(schedule.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a schedule and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_schedule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleUuid,
    ) -> Result<ScheduleRecord, sqlx::Error> {
        query_as::<Postgres, ScheduleRecord>(LOCK_SCHEDULE_SQL)
            .bind(schedule.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_schedule_by_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: Date,
    ) -> Result<Option<ScheduleRecord>, sqlx::Error> {
        query_as::<Postgres, ScheduleRecord>(GET_SCHEDULE_BY_DATE_SQL)
            .bind(SqlxDate::from(date))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_schedule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: &NewSchedule,
    ) -> Result<ScheduleRecord, sqlx::Error> {
        query_as::<Postgres, ScheduleRecord>(CREATE_SCHEDULE_SQL)
            .bind(schedule.uuid.into_uuid())
            .bind(SqlxDate::from(schedule.schedule_date))
            .bind(schedule.status.as_str())
            .bind(SqlxTimestamp::from(schedule.order_start_at))
            .bind(SqlxTimestamp::from(schedule.order_end_at))
            .bind(schedule.note.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    /// Overwrite every scalar column with the values on `schedule`.
    pub(crate) async fn update_schedule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: &ScheduleRecord,
    ) -> Result<ScheduleRecord, sqlx::Error> {
        query_as::<Postgres, ScheduleRecord>(UPDATE_SCHEDULE_SQL)
            .bind(schedule.uuid.into_uuid())
            .bind(SqlxDate::from(schedule.schedule_date))
            .bind(schedule.status.as_str())
            .bind(SqlxTimestamp::from(schedule.order_start_at))
            .bind(SqlxTimestamp::from(schedule.order_end_at))
            .bind(schedule.note.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_schedule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SCHEDULE_SQL)
            .bind(schedule.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_schedules(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ScheduleFilter,
        pagination: Pagination,
    ) -> Result<Vec<ScheduleSummaryRecord>, sqlx::Error> {
        let (from, to) = filter.date_bounds();
        let (limit, offset) = pagination.limit_offset();

        query_as::<Postgres, ScheduleSummaryRecord>(LIST_SCHEDULES_SQL)
            .bind(from.map(SqlxDate::from))
            .bind(to.map(SqlxDate::from))
            .bind(filter.status.map(ScheduleStatus::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_schedules(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ScheduleFilter,
    ) -> Result<u64, sqlx::Error> {
        let (from, to) = filter.date_bounds();

        let total: i64 = query_scalar(COUNT_SCHEDULES_SQL)
            .bind(from.map(SqlxDate::from))
            .bind(to.map(SqlxDate::from))
            .bind(filter.status.map(ScheduleStatus::as_str))
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ScheduleRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ScheduleUuid::from_uuid(row.try_get("uuid")?),
            schedule_date: row.try_get::<SqlxDate, _>("schedule_date")?.to_jiff(),
            status: try_get_status(row, "status")?,
            order_start_at: row.try_get::<SqlxTimestamp, _>("order_start_at")?.to_jiff(),
            order_end_at: row.try_get::<SqlxTimestamp, _>("order_end_at")?.to_jiff(),
            note: row.try_get("note")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ScheduleSummaryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ScheduleUuid::from_uuid(row.try_get("uuid")?),
            schedule_date: row.try_get::<SqlxDate, _>("schedule_date")?.to_jiff(),
            status: try_get_status(row, "status")?,
            order_start_at: row.try_get::<SqlxTimestamp, _>("order_start_at")?.to_jiff(),
            order_end_at: row.try_get::<SqlxTimestamp, _>("order_end_at")?.to_jiff(),
            note: row.try_get("note")?,
            item_count: try_get_count(row, "item_count")?,
            order_count: try_get_count(row, "order_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
