//! Orders Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    columns::{amount_to_i64, try_get_amount},
    orders::{
        data::{NewOrder, OrderFilter},
        records::{OrderRecord, OrderUuid},
        status::OrderStatus,
    },
    pagination::Pagination,
    schedules::{records::ScheduleUuid, status::ScheduleStatus},
};

use super::try_get_parsed;

const LOCK_SCHEDULE_STATUS_SQL: &str = include_str!("../sql/lock_schedule_status.sql");
const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const SET_ORDER_TOTAL_SQL: &str = include_str!("../sql/set_order_total.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_STATUS_SQL: &str = include_str!("../sql/lock_order_status.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("../sql/delete_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("../sql/count_orders.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the schedule row so order placement against it is serialized.
    pub(crate) async fn lock_schedule_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleUuid,
    ) -> Result<ScheduleStatus, sqlx::Error> {
        let status: String = query_scalar(LOCK_SCHEDULE_STATUS_SQL)
            .bind(schedule.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        status.parse().map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.schedule_uuid.into_uuid())
            .bind(&order.customer_name)
            .bind(&order.customer_phone)
            .bind(SqlxTimestamp::from(order.pickup_time))
            .bind(order.note.as_deref())
            .bind(&order.payment_method)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_order_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        total_amount: u64,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(SET_ORDER_TOTAL_SQL)
            .bind(order.into_uuid())
            .bind(amount_to_i64(total_amount, "total_amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderStatus, sqlx::Error> {
        let status: String = query_scalar(LOCK_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        status.parse().map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &OrderFilter,
        pagination: Pagination,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let (limit, offset) = pagination.limit_offset();

        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(filter.schedule_uuid.map(ScheduleUuid::into_uuid))
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(filter.date_from.map(SqlxDate::from))
            .bind(filter.date_to.map(SqlxDate::from))
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &OrderFilter,
    ) -> Result<u64, sqlx::Error> {
        let total: i64 = query_scalar(COUNT_ORDERS_SQL)
            .bind(filter.schedule_uuid.map(ScheduleUuid::into_uuid))
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(filter.date_from.map(SqlxDate::from))
            .bind(filter.date_to.map(SqlxDate::from))
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            schedule_uuid: ScheduleUuid::from_uuid(row.try_get("schedule_uuid")?),
            schedule_date: row.try_get::<SqlxDate, _>("schedule_date")?.to_jiff(),
            status: try_get_parsed(row, "status")?,
            customer_name: row.try_get("customer_name")?,
            customer_phone: row.try_get("customer_phone")?,
            payment_method: row.try_get("payment_method")?,
            pickup_time: row.try_get::<SqlxTimestamp, _>("pickup_time")?.to_jiff(),
            note: row.try_get("note")?,
            total_amount: try_get_amount(row, "total_amount")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
