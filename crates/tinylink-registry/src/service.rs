use crate::settings::RegistrySettings;
use async_trait::async_trait;
use jiff::Timestamp;
use std::sync::Arc;
use tinylink_core::error::Result;
use tinylink_core::{
    NewLink, ReadRepository, Registry, RegistryError, Repository, ShortCode, ShortLink,
    ShortenParams, StorageError,
};
use tinylink_generator::Generator;
use tracing::{debug, info, trace, warn};

/// A concrete implementation of the [`Registry`] trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - target URL normalization
/// - short code assignment (custom or generated)
/// - click accounting, listing and deletion
///
/// The service holds no locks. Uniqueness is decided by the repository's
/// insert; the `exists` pre-check only produces a friendlier conflict
/// before the write is attempted.
#[derive(Debug, Clone)]
pub struct RegistryService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    settings: RegistrySettings,
}

impl<R: Repository, G: Generator> RegistryService<R, G> {
    /// Creates a new `RegistryService` with default settings.
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            settings: RegistrySettings::default(),
        }
    }

    /// Creates a `RegistryService` with custom settings.
    ///
    /// Fails with `InvalidInput` if the settings could produce empty or
    /// unstorable codes.
    pub fn with_settings(repository: R, generator: G, settings: RegistrySettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            settings,
        })
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Trims the target and prepends `https://` unless it already carries an
    /// http(s) scheme.
    fn normalize_target(target: &str) -> Result<String> {
        let target = target.trim();
        if target.is_empty() {
            return Err(RegistryError::InvalidInput(
                "target URL cannot be empty".to_string(),
            ));
        }

        if has_http_scheme(target) {
            Ok(target.to_string())
        } else {
            Ok(format!("https://{target}"))
        }
    }

    async fn insert_custom(&self, code: ShortCode, target: String) -> Result<ShortLink> {
        if self.repository.exists(&code).await? {
            return Err(RegistryError::CodeConflict(code.to_string()));
        }

        match self
            .repository
            .insert(NewLink::new(code, target, Timestamp::now()))
            .await
        {
            Ok(link) => Ok(link),
            // lost a race against a concurrent writer after the pre-check
            Err(StorageError::Conflict(code)) => Err(RegistryError::CodeConflict(code)),
            Err(err) => Err(err.into()),
        }
    }

    /// Draws candidates until one is inserted.
    ///
    /// Each length gets `max_attempts` candidates, then the length widens by
    /// one, up to `max_widening` times. Storage failures are returned at once.
    async fn insert_generated(&self, target: String) -> Result<ShortLink> {
        let max_length = self.settings.max_code_length();
        let mut attempts = 0;

        for length in self.settings.code_length..=max_length {
            for _ in 0..self.settings.max_attempts {
                attempts += 1;
                let code = self.generator.generate(length);

                if self.repository.exists(&code).await? {
                    debug!(code = %code, attempts, "generated code already taken, retrying");
                    continue;
                }

                match self
                    .repository
                    .insert(NewLink::new(code, target.clone(), Timestamp::now()))
                    .await
                {
                    Ok(link) => return Ok(link),
                    Err(StorageError::Conflict(code)) => {
                        debug!(code = %code, attempts, "generated code taken concurrently, retrying");
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            if length < max_length {
                warn!(
                    length,
                    attempts, "no free code at this length, widening generated codes"
                );
            }
        }

        Err(RegistryError::CodeSpaceExhausted { attempts })
    }
}

fn has_http_scheme(target: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        target
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

#[async_trait]
impl<R: Repository, G: Generator> Registry for RegistryService<R, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<ShortLink> {
        let target = Self::normalize_target(&params.target)?;

        let link = match params.custom_code.filter(|code| !code.is_empty()) {
            Some(code) => self.insert_custom(ShortCode::new(code)?, target).await?,
            None => self.insert_generated(target).await?,
        };

        info!(id = link.id, code = %link.code, target = %link.target, "created short link");
        Ok(link)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<ShortLink>> {
        trace!(code = %code, "resolving short code");
        Ok(self.repository.get(code).await?)
    }

    async fn record_click(&self, code: &ShortCode) -> Result<()> {
        if self.repository.increment_clicks(code).await? {
            trace!(code = %code, "recorded click");
            Ok(())
        } else {
            Err(RegistryError::NotFound(code.to_string()))
        }
    }

    async fn list(&self) -> Result<Vec<ShortLink>> {
        Ok(self.repository.list().await?)
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        let removed = self.repository.delete(code).await?;
        if removed {
            info!(code = %code, "deleted short link");
        } else {
            debug!(code = %code, "delete of unknown short code ignored");
        }
        Ok(removed)
    }
}
