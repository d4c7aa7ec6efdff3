//! Column decoding helpers shared by the repositories.

use std::{error::Error, str::FromStr};

use sqlx::{Row, postgres::PgRow};

/// Decode a text column into a domain enumeration.
pub(crate) fn parse_column<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
