//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{LockedScheduleItem, PgOrderItemsRepository};
pub(crate) use orders::PgOrdersRepository;

use std::str::FromStr;

use sqlx::{Row, postgres::PgRow};

/// Decode a text status column into its enum.
pub(super) fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: &str = row.try_get(col)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
