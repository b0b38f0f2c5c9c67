//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::error::{DatabaseError, ErrorKind};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        categories::{
            data::{CategoryFilter, NewCategory},
            errors::CategoriesServiceError,
            records::{CategoryRecord, CategoryUuid},
            repository::PgCategoriesRepository,
        },
        owners::records::OwnerUuid,
        pagination::{Paginated, Pagination},
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(
        &self,
        owner: OwnerUuid,
        filter: CategoryFilter,
        pagination: Pagination,
    ) -> Result<Paginated<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let total = self.repository.count_categories(&mut tx, &filter).await?;

        let items = self
            .repository
            .list_categories(&mut tx, &filter, pagination)
            .await?;

        tx.commit().await?;

        Ok(Paginated {
            items,
            meta: pagination.meta(total),
        })
    }

    async fn get_category(
        &self,
        owner: OwnerUuid,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        owner: OwnerUuid,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let category = NewCategory {
            name: category_name(&category.name)?,
            ..category
        };

        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let created = self.repository.create_category(&mut tx, &category).await?;

        tx.commit().await?;

        info!(owner_uuid = %owner, category_uuid = %created.uuid, "created category");

        Ok(created)
    }

    async fn rename_category(
        &self,
        owner: OwnerUuid,
        category: CategoryUuid,
        name: String,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let name = category_name(&name)?;

        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let renamed = self
            .repository
            .rename_category(&mut tx, category, &name)
            .await?;

        tx.commit().await?;

        info!(owner_uuid = %owner, category_uuid = %category, "renamed category");

        Ok(renamed)
    }

    async fn delete_category(
        &self,
        owner: OwnerUuid,
        category: CategoryUuid,
    ) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let rows_affected = self
            .repository
            .delete_category(&mut tx, category)
            .await
            .map_err(|error| {
                let kind = error.as_database_error().map(DatabaseError::kind);

                if matches!(kind, Some(ErrorKind::ForeignKeyViolation)) {
                    CategoriesServiceError::InUse
                } else {
                    error.into()
                }
            })?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(owner_uuid = %owner, category_uuid = %category, "deleted category");

        Ok(())
    }
}

fn category_name(raw: &str) -> Result<String, CategoriesServiceError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(CategoriesServiceError::BlankName);
    }

    Ok(name.to_string())
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Lists categories oldest first, optionally filtered by name.
    async fn list_categories(
        &self,
        owner: OwnerUuid,
        filter: CategoryFilter,
        pagination: Pagination,
    ) -> Result<Paginated<CategoryRecord>, CategoriesServiceError>;

    async fn get_category(
        &self,
        owner: OwnerUuid,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates a category. Names are unique per owner.
    async fn create_category(
        &self,
        owner: OwnerUuid,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    async fn rename_category(
        &self,
        owner: OwnerUuid,
        category: CategoryUuid,
        name: String,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Deletes a category that no product refers to.
    async fn delete_category(
        &self,
        owner: OwnerUuid,
        category: CategoryUuid,
    ) -> Result<(), CategoriesServiceError>;
}
