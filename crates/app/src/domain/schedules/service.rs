//! Schedules service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};
use sqlx::{
    Postgres, Transaction,
    error::{DatabaseError, ErrorKind},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        owners::records::OwnerUuid,
        pagination::{Paginated, Pagination},
        products::records::ProductUuid,
        schedules::{
            data::{NewSchedule, NewScheduleItem, ScheduleFilter, ScheduleMonth, ScheduleUpdate},
            errors::SchedulesServiceError,
            records::{ScheduleItemRecord, ScheduleRecord, ScheduleSummaryRecord, ScheduleUuid},
            repositories::{PgScheduleItemsRepository, PgSchedulesRepository, ProductSnapshot},
            status::ScheduleStatus,
        },
        transitions::TransitionPolicy,
    },
};

/// A schedule item that passed validation and is ready to bind.
#[derive(Debug, Clone, Copy)]
struct CheckedItem {
    product_uuid: ProductUuid,
    sales_limit: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct PgSchedulesService {
    db: Db,
    policy: TransitionPolicy,
    schedules_repository: PgSchedulesRepository,
    items_repository: PgScheduleItemsRepository,
}

impl PgSchedulesService {
    #[must_use]
    pub fn new(db: Db, policy: TransitionPolicy) -> Self {
        Self {
            db,
            policy,
            schedules_repository: PgSchedulesRepository::new(),
            items_repository: PgScheduleItemsRepository::new(),
        }
    }

    /// Attach `items` to `schedule`, snapshotting each product's name and price.
    ///
    /// Every product must be active and visible to the owner, otherwise nothing
    /// is written and the caller's transaction should be dropped.
    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        schedule: ScheduleUuid,
        items: &[CheckedItem],
    ) -> Result<Vec<ScheduleItemRecord>, SchedulesServiceError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let product_uuids: Vec<Uuid> = items
            .iter()
            .map(|item| item.product_uuid.into_uuid())
            .collect();

        let products: FxHashMap<ProductUuid, ProductSnapshot> = self
            .items_repository
            .lock_active_products(tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        if products.len() != items.len() {
            return Err(SchedulesServiceError::InvalidProducts);
        }

        let mut created = Vec::with_capacity(items.len());

        for item in items {
            let product = products
                .get(&item.product_uuid)
                .ok_or(SchedulesServiceError::InvalidProducts)?;

            let record = self
                .items_repository
                .create_schedule_item(tx, schedule, product, item.sales_limit)
                .await?;

            created.push(record);
        }

        Ok(created)
    }
}

#[async_trait]
impl SchedulesService for PgSchedulesService {
    #[tracing::instrument(
        name = "schedules.service.create_schedule",
        skip(self, schedule),
        fields(owner_uuid = %owner, schedule_uuid = %schedule.uuid, schedule_date = %schedule.schedule_date),
        err
    )]
    async fn create_schedule(
        &self,
        owner: OwnerUuid,
        schedule: NewSchedule,
    ) -> Result<ScheduleRecord, SchedulesServiceError> {
        if schedule.order_start_at >= schedule.order_end_at {
            return Err(SchedulesServiceError::InvalidOrderWindow);
        }

        let items = check_items(&schedule.items)?;

        let schedule = NewSchedule {
            note: normalize_note(schedule.note),
            ..schedule
        };

        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let mut created = self
            .schedules_repository
            .create_schedule(&mut tx, &schedule)
            .await?;

        let items = self.attach_items(&mut tx, created.uuid, &items).await?;

        tx.commit().await?;

        created.items = items;

        info!(item_count = created.items.len(), "created schedule");

        Ok(created)
    }

    #[tracing::instrument(
        name = "schedules.service.update_schedule",
        skip(self, update),
        fields(owner_uuid = %owner, schedule_uuid = %schedule),
        err
    )]
    async fn update_schedule(
        &self,
        owner: OwnerUuid,
        schedule: ScheduleUuid,
        update: ScheduleUpdate,
    ) -> Result<ScheduleRecord, SchedulesServiceError> {
        let items = update.items.as_deref().map(check_items).transpose()?;

        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let current = self
            .schedules_repository
            .lock_schedule(&mut tx, schedule)
            .await?;

        let next_status = update.status.unwrap_or(current.status);

        if !self.policy.permits(current.status, next_status) {
            return Err(SchedulesServiceError::TransitionRejected {
                from: current.status,
                to: next_status,
            });
        }

        let merged = ScheduleRecord {
            schedule_date: update.schedule_date.unwrap_or(current.schedule_date),
            order_start_at: update.order_start_at.unwrap_or(current.order_start_at),
            order_end_at: update.order_end_at.unwrap_or(current.order_end_at),
            status: next_status,
            note: match update.note {
                Some(note) => normalize_note(note),
                None => current.note.clone(),
            },
            ..current
        };

        if merged.order_start_at >= merged.order_end_at {
            return Err(SchedulesServiceError::InvalidOrderWindow);
        }

        let mut updated = self
            .schedules_repository
            .update_schedule(&mut tx, &merged)
            .await?;

        updated.items = match items {
            Some(items) => {
                self.items_repository
                    .delete_schedule_items(&mut tx, schedule)
                    .await?;

                self.attach_items(&mut tx, schedule, &items).await?
            }
            None => {
                self.items_repository
                    .get_schedule_items(&mut tx, schedule)
                    .await?
            }
        };

        tx.commit().await?;

        info!(status = %updated.status, "updated schedule");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "schedules.service.delete_schedule",
        skip(self),
        fields(owner_uuid = %owner, schedule_uuid = %schedule),
        err
    )]
    async fn delete_schedule(
        &self,
        owner: OwnerUuid,
        schedule: ScheduleUuid,
    ) -> Result<(), SchedulesServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let rows_affected = self
            .schedules_repository
            .delete_schedule(&mut tx, schedule)
            .await
            .map_err(|error| {
                let kind = error.as_database_error().map(DatabaseError::kind);

                if matches!(kind, Some(ErrorKind::ForeignKeyViolation)) {
                    SchedulesServiceError::HasOrders
                } else {
                    error.into()
                }
            })?;

        if rows_affected == 0 {
            return Err(SchedulesServiceError::NotFound);
        }

        tx.commit().await?;

        info!("deleted schedule");

        Ok(())
    }

    async fn get_schedule(
        &self,
        owner: OwnerUuid,
        schedule: ScheduleUuid,
    ) -> Result<ScheduleRecord, SchedulesServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let mut record = self
            .schedules_repository
            .get_schedule(&mut tx, schedule)
            .await?;

        let items = self
            .items_repository
            .get_schedule_items(&mut tx, schedule)
            .await?;

        tx.commit().await?;

        record.items.extend(items);

        Ok(record)
    }

    async fn get_schedule_by_date(
        &self,
        owner: OwnerUuid,
        date: Date,
    ) -> Result<Option<ScheduleRecord>, SchedulesServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let Some(mut record) = self
            .schedules_repository
            .find_schedule_by_date(&mut tx, date)
            .await?
        else {
            return Ok(None);
        };

        let items = self
            .items_repository
            .get_schedule_items(&mut tx, record.uuid)
            .await?;

        tx.commit().await?;

        record.items.extend(items);

        Ok(Some(record))
    }

    async fn list_schedules(
        &self,
        owner: OwnerUuid,
        filter: ScheduleFilter,
        pagination: Pagination,
    ) -> Result<Paginated<ScheduleSummaryRecord>, SchedulesServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let total = self
            .schedules_repository
            .count_schedules(&mut tx, &filter)
            .await?;

        let items = self
            .schedules_repository
            .list_schedules(&mut tx, &filter, pagination)
            .await?;

        tx.commit().await?;

        Ok(Paginated {
            items,
            meta: pagination.meta(total),
        })
    }

    async fn list_schedules_by_month(
        &self,
        owner: OwnerUuid,
        month: ScheduleMonth,
        status: Option<ScheduleStatus>,
    ) -> Result<Vec<ScheduleSummaryRecord>, SchedulesServiceError> {
        let filter = ScheduleFilter {
            month: Some(month),
            status,
            ..ScheduleFilter::default()
        };

        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let schedules = self
            .schedules_repository
            .list_schedules(&mut tx, &filter, Pagination::All)
            .await?;

        tx.commit().await?;

        Ok(schedules)
    }
}

/// Reject duplicate products and sales limits the store cannot hold.
fn check_items(items: &[NewScheduleItem]) -> Result<Vec<CheckedItem>, SchedulesServiceError> {
    let mut seen = FxHashSet::default();

    items
        .iter()
        .map(|item| {
            if !seen.insert(item.product_uuid) {
                return Err(SchedulesServiceError::DuplicateProduct);
            }

            let sales_limit = item
                .sales_limit
                .map(|limit| i32::try_from(limit.get()))
                .transpose()
                .map_err(|_| SchedulesServiceError::InvalidSalesLimit)?;

            Ok(CheckedItem {
                product_uuid: item.product_uuid,
                sales_limit,
            })
        })
        .collect()
}

/// Trim a note, treating blank text as no note.
fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|note| note.trim().to_string())
        .filter(|note| !note.is_empty())
}

#[automock]
#[async_trait]
pub trait SchedulesService: Send + Sync {
    /// Creates a schedule and its items in one transaction.
    async fn create_schedule(
        &self,
        owner: OwnerUuid,
        schedule: NewSchedule,
    ) -> Result<ScheduleRecord, SchedulesServiceError>;

    /// Applies a partial update. Supplied items replace the whole item set.
    async fn update_schedule(
        &self,
        owner: OwnerUuid,
        schedule: ScheduleUuid,
        update: ScheduleUpdate,
    ) -> Result<ScheduleRecord, SchedulesServiceError>;

    /// Deletes a schedule that has no orders, together with its items.
    async fn delete_schedule(
        &self,
        owner: OwnerUuid,
        schedule: ScheduleUuid,
    ) -> Result<(), SchedulesServiceError>;

    /// Retrieve a single schedule with its items.
    async fn get_schedule(
        &self,
        owner: OwnerUuid,
        schedule: ScheduleUuid,
    ) -> Result<ScheduleRecord, SchedulesServiceError>;

    /// Retrieve the schedule on `date`, if there is one.
    async fn get_schedule_by_date(
        &self,
        owner: OwnerUuid,
        date: Date,
    ) -> Result<Option<ScheduleRecord>, SchedulesServiceError>;

    /// Filtered, paginated schedule summaries ordered by date.
    async fn list_schedules(
        &self,
        owner: OwnerUuid,
        filter: ScheduleFilter,
        pagination: Pagination,
    ) -> Result<Paginated<ScheduleSummaryRecord>, SchedulesServiceError>;

    /// Every schedule in `month`, ordered by date.
    async fn list_schedules_by_month(
        &self,
        owner: OwnerUuid,
        month: ScheduleMonth,
        status: Option<ScheduleStatus>,
    ) -> Result<Vec<ScheduleSummaryRecord>, SchedulesServiceError>;
}
