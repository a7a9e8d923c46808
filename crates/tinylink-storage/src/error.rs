use jiff::Timestamp;
use tinylink_core::{ShortCode, ShortLink, StorageError};

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

pub(crate) fn map_migrate_error(err: sqlx::migrate::MigrateError) -> StorageError {
    StorageError::Operation(format!("schema migration failed: {err}"))
}

/// A `short_links` row as stored by the relational adapters.
///
/// `created_at` holds microseconds since the Unix epoch.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LinkRow {
    id: i64,
    code: String,
    target: String,
    created_at: i64,
    clicks: i64,
}

impl TryFrom<LinkRow> for ShortLink {
    type Error = StorageError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        let created_at = Timestamp::from_microsecond(row.created_at).map_err(|e| {
            StorageError::InvalidData(format!(
                "invalid created_at timestamp '{}': {e}",
                row.created_at
            ))
        })?;
        let clicks = u64::try_from(row.clicks).map_err(|_| {
            StorageError::InvalidData(format!("negative click count {} for '{}'", row.clicks, row.code))
        })?;

        Ok(ShortLink {
            id: row.id,
            code: ShortCode::new_unchecked(row.code),
            target: row.target,
            created_at,
            clicks,
        })
    }
}

pub(crate) fn rows_into_links(rows: Vec<LinkRow>) -> Result<Vec<ShortLink>, StorageError> {
    rows.into_iter().map(ShortLink::try_from).collect()
}
