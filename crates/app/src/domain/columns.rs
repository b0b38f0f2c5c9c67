//! Shared column conversions for money, quantities and counts.

use sqlx::{Row, postgres::PgRow};

/// Read a non-negative `BIGINT` money column.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Read a non-negative `INTEGER` quantity column.
pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i32: i32 = row.try_get(col)?;

    u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Read an optional non-negative `INTEGER` quantity column.
pub(crate) fn try_get_optional_quantity(
    row: &PgRow,
    col: &str,
) -> Result<Option<u32>, sqlx::Error> {
    row.try_get::<Option<i32>, _>(col)?
        .map(|quantity| {
            u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: col.to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}

/// Read a `COUNT(*)` column.
pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    try_get_amount(row, col)
}

/// Convert a money amount for binding.
pub(crate) fn amount_to_i64(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
