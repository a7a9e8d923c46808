//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the types shared by the registry, the storage
//! adapters and the outer layers (HTTP gateway, CLI): the [`ShortCode`]
//! key, the [`ShortLink`] record, the error taxonomy, the [`Registry`]
//! contract and the persistence port ([`ReadRepository`] / [`Repository`]).

pub mod error;
pub mod link;
pub mod registry;
pub mod repository;
pub mod shortcode;

pub use error::{RegistryError, StorageError};
pub use link::{NewLink, ShortLink};
pub use registry::{Registry, ShortenParams};
pub use repository::{ReadRepository, Repository};
pub use shortcode::{ShortCode, MAX_CODE_LENGTH};
