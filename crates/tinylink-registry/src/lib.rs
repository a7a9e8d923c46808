//! The tinylink code registry.
//!
//! [`RegistryService`] turns shorten requests into uniquely coded, persisted
//! links and mediates resolution, click accounting, listing and deletion.
//! Storage is injected through the [`Repository`](tinylink_core::Repository)
//! port; [`bootstrap`] wires a registry to a configured backend and [`qr`]
//! renders short URLs as QR codes.

pub mod bootstrap;
pub mod clicks;
pub mod qr;
pub mod service;
pub mod settings;

pub use bootstrap::{open_registry, StorageArgs, StorageBackendArg};
pub use clicks::ClickRecorder;
pub use qr::{render_png, QrError, DEFAULT_QR_SIZE};
pub use service::RegistryService;
pub use settings::RegistrySettings;
pub use tinylink_core::{Registry, RegistryError, ShortCode, ShortLink, ShortenParams};
