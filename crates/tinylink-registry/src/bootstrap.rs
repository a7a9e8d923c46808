use crate::service::RegistryService;
use crate::settings::RegistrySettings;
use clap::{Args, ValueEnum};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use tinylink_core::{Registry, RegistryError, Repository};
use tinylink_generator::{RandomGenerator, DEFAULT_CODE_LENGTH};
use tinylink_storage::{InMemoryRepository, MySqlRepository, SqliteRepository};
use tracing::info;

pub const STORAGE_BACKEND_ENV: &str = "TINYLINK_STORAGE_BACKEND";
pub const SQLITE_PATH_ENV: &str = "TINYLINK_SQLITE_PATH";
pub const MYSQL_DSN_ENV: &str = "TINYLINK_MYSQL_DSN";
pub const CODE_LENGTH_ENV: &str = "TINYLINK_CODE_LENGTH";

pub const DEFAULT_SQLITE_PATH: &str = "tinylink.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

/// Storage and generation flags shared by the CLI and the gateway.
#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = SQLITE_PATH_ENV, default_value = DEFAULT_SQLITE_PATH)]
    pub sqlite_path: PathBuf,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
}

impl StorageArgs {
    pub fn settings(&self) -> RegistrySettings {
        RegistrySettings::builder()
            .code_length(self.code_length)
            .build()
    }
}

/// Connects the configured backend and wraps it in a [`RegistryService`].
pub async fn open_registry(args: &StorageArgs) -> Result<Arc<dyn Registry>, RegistryError> {
    let settings = args.settings();
    // reject bad settings before opening any database
    settings.validate()?;

    info!(
        storage_backend = %args.storage,
        code_length = settings.code_length,
        "opening registry"
    );

    let registry = match args.storage {
        StorageBackendArg::InMemory => build(InMemoryRepository::new(), settings)?,
        StorageBackendArg::Sqlite => {
            let repository = SqliteRepository::connect(&args.sqlite_path).await?;
            build(repository, settings)?
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = args.mysql_dsn.as_deref().ok_or_else(|| {
                RegistryError::InvalidInput(
                    "mysql dsn is required when storage backend is mysql".to_string(),
                )
            })?;
            let repository = MySqlRepository::connect(mysql_dsn).await?;
            build(repository, settings)?
        }
    };

    Ok(registry)
}

fn build<R: Repository>(
    repository: R,
    settings: RegistrySettings,
) -> Result<Arc<dyn Registry>, RegistryError> {
    let service = RegistryService::with_settings(repository, RandomGenerator::new(), settings)?;
    Ok(Arc::new(service))
}
