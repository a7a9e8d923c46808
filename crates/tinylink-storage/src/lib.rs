//! Persistence adapters for the tinylink registry.
//!
//! Every adapter implements [`Repository`] and enforces code uniqueness
//! itself, so any of them can back a registry interchangeably.

mod error;
pub mod memory;
pub mod mysql;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use sqlite::SqliteRepository;
pub use tinylink_core::{ReadRepository, Repository, StorageError};
