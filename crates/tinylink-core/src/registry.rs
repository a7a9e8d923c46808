use crate::error::Result;
use crate::link::ShortLink;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters for creating a short link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortenParams {
    /// The URL to shorten. `https://` is prepended when no scheme is given.
    pub target: String,
    /// Optional caller-chosen code. `None` or an empty string means "generate one".
    pub custom_code: Option<String>,
}

impl ShortenParams {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            custom_code: None,
        }
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }
}

/// Assigns, resolves and accounts for short codes.
#[async_trait]
pub trait Registry: Send + Sync + 'static {
    /// Creates a short link and returns the stored record.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortLink>;

    /// Looks up a link by its exact code.
    /// Returns `None` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<ShortLink>>;

    /// Adds one click to a link. Fails with `NotFound` if the code does not exist.
    async fn record_click(&self, code: &ShortCode) -> Result<()>;

    /// Returns every link, newest first.
    async fn list(&self) -> Result<Vec<ShortLink>>;

    /// Deletes a link. Deleting an unknown code is not an error.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, code: &ShortCode) -> Result<bool>;
}
