//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, OrderFilter, OrderLineTarget},
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
            status::OrderStatus,
        },
        owners::records::OwnerUuid,
        pagination::{Paginated, Pagination},
        schedules::status::ScheduleStatus,
        transitions::TransitionPolicy,
    },
};

/// An order line whose quantity fits the store's column.
#[derive(Debug, Clone, Copy)]
struct CheckedLine {
    target: OrderLineTarget,
    quantity: i32,
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    policy: TransitionPolicy,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, policy: TransitionPolicy) -> Self {
        Self {
            db,
            policy,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(
            owner_uuid = %owner,
            order_uuid = %order.uuid,
            schedule_uuid = %order.schedule_uuid,
            line_count = order.items.len()
        ),
        err
    )]
    async fn create_order(
        &self,
        owner: OwnerUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let (order, lines) = check_order(order)?;

        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let schedule_status = self
            .orders_repository
            .lock_schedule_status(&mut tx, order.schedule_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => OrdersServiceError::ScheduleNotFound,
                error => error.into(),
            })?;

        if schedule_status != ScheduleStatus::Open {
            return Err(OrdersServiceError::NotOpen);
        }

        let created = self.orders_repository.create_order(&mut tx, &order).await?;

        let mut total_amount: u64 = 0;
        let mut items = Vec::with_capacity(lines.len());

        for line in &lines {
            let item = self
                .items_repository
                .lock_schedule_item(&mut tx, order.schedule_uuid, line.target)
                .await?
                .ok_or(OrdersServiceError::ItemNotInSchedule)?;

            let quantity = u64::from(line.quantity.unsigned_abs());

            if let Some(limit) = item.sales_limit {
                let sold = self
                    .items_repository
                    .sold_quantity(&mut tx, item.uuid)
                    .await?;

                debug!(
                    schedule_item_uuid = %item.uuid,
                    sold,
                    requested = quantity,
                    limit,
                    "checked sales limit"
                );

                if sold.saturating_add(quantity) > u64::from(limit) {
                    return Err(OrdersServiceError::SalesLimitExceeded);
                }
            }

            let line_total = item
                .unit_price
                .checked_mul(quantity)
                .ok_or(OrdersServiceError::TotalOverflow)?;

            total_amount = total_amount
                .checked_add(line_total)
                .filter(|total| i64::try_from(*total).is_ok())
                .ok_or(OrdersServiceError::TotalOverflow)?;

            let record = self
                .items_repository
                .create_order_item(&mut tx, created.uuid, &item, line.quantity, line_total)
                .await?;

            items.push(record);
        }

        let mut placed = self
            .orders_repository
            .set_order_total(&mut tx, created.uuid, total_amount)
            .await?;

        tx.commit().await?;

        placed.items = items;

        info!(total_amount = placed.total_amount, "placed order");

        Ok(placed)
    }

    #[tracing::instrument(
        name = "orders.service.update_order_status",
        skip(self),
        fields(owner_uuid = %owner, order_uuid = %order),
        err
    )]
    async fn update_order_status(
        &self,
        owner: OwnerUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let current = self
            .orders_repository
            .lock_order_status(&mut tx, order)
            .await?;

        if !self.policy.permits(current, status) {
            return Err(OrdersServiceError::TransitionRejected {
                from: current,
                to: status,
            });
        }

        let mut updated = self
            .orders_repository
            .update_order_status(&mut tx, order, status)
            .await?;

        let items = self.items_repository.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        updated.items = items;

        info!(from = %current, to = %status, "updated order status");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.delete_order",
        skip(self),
        fields(owner_uuid = %owner, order_uuid = %order),
        err
    )]
    async fn delete_order(&self, owner: OwnerUuid, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let rows_affected = self.orders_repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!("deleted order");

        Ok(())
    }

    async fn get_order(
        &self,
        owner: OwnerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let mut record = self.orders_repository.get_order(&mut tx, order).await?;

        let items = self.items_repository.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        record.items.extend(items);

        Ok(record)
    }

    async fn list_orders(
        &self,
        owner: OwnerUuid,
        filter: OrderFilter,
        pagination: Pagination,
    ) -> Result<Paginated<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let total = self.orders_repository.count_orders(&mut tx, &filter).await?;

        let items = self
            .orders_repository
            .list_orders(&mut tx, &filter, pagination)
            .await?;

        tx.commit().await?;

        Ok(Paginated {
            items,
            meta: pagination.meta(total),
        })
    }
}

/// Trim and validate an order before any row is touched.
fn check_order(
    order: NewOrder,
) -> Result<(NewOrder, SmallVec<[CheckedLine; 4]>), OrdersServiceError> {
    let customer_name = required(order.customer_name, "customer_name")?;
    let customer_phone = required(order.customer_phone, "customer_phone")?;
    let payment_method = required(order.payment_method, "payment_method")?;

    if order.items.is_empty() {
        return Err(OrdersServiceError::EmptyItems);
    }

    let lines = order
        .items
        .iter()
        .map(|line| {
            let quantity = i32::try_from(line.quantity.get())
                .map_err(|_| OrdersServiceError::InvalidQuantity)?;

            Ok(CheckedLine {
                target: line.target,
                quantity,
            })
        })
        .collect::<Result<SmallVec<[CheckedLine; 4]>, OrdersServiceError>>()?;

    let order = NewOrder {
        customer_name,
        customer_phone,
        payment_method,
        note: order
            .note
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty()),
        ..order
    };

    Ok((order, lines))
}

fn required(value: String, field: &'static str) -> Result<String, OrdersServiceError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(OrdersServiceError::BlankField(field));
    }

    Ok(trimmed.to_string())
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order against an open schedule, claiming capacity for every
    /// line or for none of them.
    async fn create_order(
        &self,
        owner: OwnerUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Sets an order's status.
    async fn update_order_status(
        &self,
        owner: OwnerUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Permanently deletes an order and its items.
    async fn delete_order(&self, owner: OwnerUuid, order: OrderUuid)
    -> Result<(), OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(
        &self,
        owner: OwnerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Filtered, paginated orders, newest first.
    async fn list_orders(
        &self,
        owner: OwnerUuid,
        filter: OrderFilter,
        pagination: Pagination,
    ) -> Result<Paginated<OrderRecord>, OrdersServiceError>;
}
