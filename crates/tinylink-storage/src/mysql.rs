use crate::error::{is_unique_violation, map_migrate_error, map_sqlx_error, rows_into_links, LinkRow};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::MySqlPool;
use tinylink_core::repository::Result;
use tinylink_core::{NewLink, ReadRepository, Repository, ShortCode, ShortLink, StorageError};
use tracing::debug;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations/mysql");

/// MySQL implementation of the repository contract.
///
/// `code` is stored with the `utf8mb4_0900_bin` collation so that lookups and
/// the unique key compare bytes: case and trailing spaces are significant.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool and
    /// applying the schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    /// Applies pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.map_err(map_migrate_error)?;
        debug!("mysql schema is up to date");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortLink>> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, target, created_at, clicks
            FROM short_links
            WHERE code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(ShortLink::try_from).transpose()
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM short_links
            WHERE code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }

    async fn list(&self) -> Result<Vec<ShortLink>> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, target, created_at, clicks
            FROM short_links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows_into_links(rows)
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, link: NewLink) -> Result<ShortLink> {
        let result = sqlx::query(
            r#"
            INSERT INTO short_links (code, target, created_at, clicks)
            VALUES (?, ?, ?, 0)
            "#,
        )
        .bind(link.code.as_str())
        .bind(link.target.as_str())
        .bind(link.created_at.as_microsecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let id = i64::try_from(done.last_insert_id()).map_err(|_| {
                    StorageError::InvalidData(format!(
                        "insert id {} does not fit in i64",
                        done.last_insert_id()
                    ))
                })?;
                Ok(link.into_link(id))
            }
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(link.code.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn increment_clicks(&self, code: &ShortCode) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE short_links
            SET clicks = clicks + 1
            WHERE code = ?
            "#,
        )
        .bind(code.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM short_links
            WHERE code = ?
            "#,
        )
        .bind(code.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
