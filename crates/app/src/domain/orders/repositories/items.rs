//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    columns::{amount_to_i64, try_get_amount, try_get_optional_quantity, try_get_quantity},
    orders::{
        data::OrderLineTarget,
        records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    },
    products::records::ProductUuid,
    schedules::records::{ScheduleItemUuid, ScheduleUuid},
};

const LOCK_SCHEDULE_ITEM_BY_UUID_SQL: &str =
    include_str!("../sql/lock_schedule_item_by_uuid.sql");
const LOCK_SCHEDULE_ITEM_BY_PRODUCT_SQL: &str =
    include_str!("../sql/lock_schedule_item_by_product.sql");
const SOLD_QUANTITY_SQL: &str = include_str!("../sql/sold_quantity.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

/// A schedule item held under a row lock while an order line is priced.
#[derive(Debug, Clone)]
pub(crate) struct LockedScheduleItem {
    pub(crate) uuid: ScheduleItemUuid,
    pub(crate) product_uuid: ProductUuid,
    pub(crate) product_name: String,
    pub(crate) unit_price: u64,
    pub(crate) sales_limit: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Resolve `target` within `schedule` and lock the matching item row.
    pub(crate) async fn lock_schedule_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleUuid,
        target: OrderLineTarget,
    ) -> Result<Option<LockedScheduleItem>, sqlx::Error> {
        let (sql, key) = match target {
            OrderLineTarget::ScheduleItem(item) => (LOCK_SCHEDULE_ITEM_BY_UUID_SQL, item.into_uuid()),
            OrderLineTarget::Product(product) => {
                (LOCK_SCHEDULE_ITEM_BY_PRODUCT_SQL, product.into_uuid())
            }
        };

        query_as::<Postgres, LockedScheduleItem>(sql)
            .bind(schedule.into_uuid())
            .bind(key)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Quantity of `item` already claimed by placed or completed orders.
    pub(crate) async fn sold_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ScheduleItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let sold: i64 = query_scalar(SOLD_QUANTITY_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(sold).map_err(|e| sqlx::Error::ColumnDecode {
            index: "sold".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &LockedScheduleItem,
        quantity: i32,
        line_total: u64,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(item.uuid.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(&item.product_name)
            .bind(amount_to_i64(item.unit_price, "unit_price")?)
            .bind(quantity)
            .bind(amount_to_i64(line_total, "line_total")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for LockedScheduleItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ScheduleItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            unit_price: try_get_amount(row, "unit_price")?,
            sales_limit: try_get_optional_quantity(row, "sales_limit")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            schedule_item_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("schedule_item_uuid")?
                .map(ScheduleItemUuid::from_uuid),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_quantity(row, "quantity")?,
            line_total: try_get_amount(row, "line_total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
