use crate::error::StorageError;
use crate::link::{NewLink, ShortLink};
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the link stored under `code`.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortLink>>;

    /// Checks whether a short code is currently assigned.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;

    /// Returns every link, newest first (`created_at` desc, then `id` desc).
    async fn list(&self) -> Result<Vec<ShortLink>>;
}

/// The persistence port of the registry.
///
/// Implementations are the authority on code uniqueness: the registry's own
/// existence check is only advisory and can lose a race against a
/// concurrent writer.
#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new link if its code is free, assigning the id.
    /// Returns `Err(StorageError::Conflict)` if the code already exists.
    async fn insert(&self, link: NewLink) -> Result<ShortLink>;

    /// Atomically adds one click to the link stored under `code`.
    /// Returns `false` if the code does not exist.
    async fn increment_clicks(&self, code: &ShortCode) -> Result<bool>;

    /// Deletes the link stored under `code`.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
impl<T: ReadRepository> ReadRepository for std::sync::Arc<T> {
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortLink>> {
        (**self).get(code).await
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        (**self).exists(code).await
    }

    async fn list(&self) -> Result<Vec<ShortLink>> {
        (**self).list().await
    }
}

#[async_trait]
impl<T: Repository> Repository for std::sync::Arc<T> {
    async fn insert(&self, link: NewLink) -> Result<ShortLink> {
        (**self).insert(link).await
    }

    async fn increment_clicks(&self, code: &ShortCode) -> Result<bool> {
        (**self).increment_clicks(code).await
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        (**self).delete(code).await
    }
}
