//! Owners Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::owners::{
    data::NewOwner,
    records::{OwnerRecord, OwnerUuid},
};

const CREATE_OWNER_SQL: &str = include_str!("sql/create_owner.sql");
const GET_OWNER_SQL: &str = include_str!("sql/get_owner.sql");

/// PostgreSQL-backed owners repository.
///
/// Owners sit above row-level security, so this repository works on the
/// administrative pool rather than an owner-scoped transaction.
#[derive(Debug, Clone)]
pub(crate) struct PgOwnersRepository {
    pool: PgPool,
}

impl PgOwnersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_owner(&self, owner: NewOwner) -> Result<OwnerRecord, sqlx::Error> {
        query_as::<Postgres, OwnerRecord>(CREATE_OWNER_SQL)
            .bind(owner.uuid.into_uuid())
            .bind(owner.name)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_owner(&self, owner: OwnerUuid) -> Result<OwnerRecord, sqlx::Error> {
        query_as::<Postgres, OwnerRecord>(GET_OWNER_SQL)
            .bind(owner.into_uuid())
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OwnerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OwnerUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
