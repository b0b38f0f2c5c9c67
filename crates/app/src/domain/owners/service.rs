//! Owners service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::domain::owners::{
    data::NewOwner,
    errors::OwnersServiceError,
    records::{OwnerRecord, OwnerUuid},
    repository::PgOwnersRepository,
};

#[derive(Debug, Clone)]
pub struct PgOwnersService {
    repository: PgOwnersRepository,
}

impl PgOwnersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgOwnersRepository::new(pool),
        }
    }
}

#[async_trait]
impl OwnersService for PgOwnersService {
    async fn create_owner(&self, owner: NewOwner) -> Result<OwnerRecord, OwnersServiceError> {
        if owner.name.trim().is_empty() {
            return Err(OwnersServiceError::InvalidData);
        }

        let created = self.repository.create_owner(owner).await?;

        info!(owner_uuid = %created.uuid, "created owner");

        Ok(created)
    }

    async fn get_owner(&self, owner: OwnerUuid) -> Result<OwnerRecord, OwnersServiceError> {
        self.repository.get_owner(owner).await.map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Owner account operations.
pub trait OwnersService: Send + Sync {
    /// Creates a new owner.
    async fn create_owner(&self, owner: NewOwner) -> Result<OwnerRecord, OwnersServiceError>;

    /// Retrieves an active owner.
    async fn get_owner(&self, owner: OwnerUuid) -> Result<OwnerRecord, OwnersServiceError>;
}
