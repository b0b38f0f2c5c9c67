//! Schedule Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    columns::{amount_to_i64, try_get_amount, try_get_optional_quantity},
    products::records::ProductUuid,
    schedules::records::{ScheduleItemRecord, ScheduleItemUuid, ScheduleUuid},
};

const GET_SCHEDULE_ITEMS_SQL: &str = include_str!("../sql/get_schedule_items.sql");
const CREATE_SCHEDULE_ITEM_SQL: &str = include_str!("../sql/create_schedule_item.sql");
const DELETE_SCHEDULE_ITEMS_SQL: &str = include_str!("../sql/delete_schedule_items.sql");
const LOCK_ACTIVE_PRODUCTS_SQL: &str = include_str!("../sql/lock_active_products.sql");

/// Name and price of an active product at the moment it is attached.
#[derive(Debug, Clone)]
pub(crate) struct ProductSnapshot {
    pub(crate) uuid: ProductUuid,
    pub(crate) name: String,
    pub(crate) price: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgScheduleItemsRepository;

impl PgScheduleItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_schedule_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleUuid,
    ) -> Result<Vec<ScheduleItemRecord>, sqlx::Error> {
        query_as::<Postgres, ScheduleItemRecord>(GET_SCHEDULE_ITEMS_SQL)
            .bind(schedule.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_schedule_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleUuid,
        product: &ProductSnapshot,
        sales_limit: Option<i32>,
    ) -> Result<ScheduleItemRecord, sqlx::Error> {
        query_as::<Postgres, ScheduleItemRecord>(CREATE_SCHEDULE_ITEM_SQL)
            .bind(ScheduleItemUuid::new().into_uuid())
            .bind(schedule.into_uuid())
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(amount_to_i64(product.price, "unit_price")?)
            .bind(sales_limit)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_schedule_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SCHEDULE_ITEMS_SQL)
            .bind(schedule.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Share-lock the active, non-deleted products among `products` so they
    /// cannot be deactivated while being attached.
    pub(crate) async fn lock_active_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<Vec<ProductSnapshot>, sqlx::Error> {
        query_as::<Postgres, ProductSnapshot>(LOCK_ACTIVE_PRODUCTS_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ScheduleItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ScheduleItemUuid::from_uuid(row.try_get("uuid")?),
            schedule_uuid: ScheduleUuid::from_uuid(row.try_get("schedule_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            unit_price: try_get_amount(row, "unit_price")?,
            sales_limit: try_get_optional_quantity(row, "sales_limit")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSnapshot {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
        })
    }
}
