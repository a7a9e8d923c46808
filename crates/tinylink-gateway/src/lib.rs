//! HTTP surface of tinylink: a JSON API over the code registry plus the
//! public redirect route.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
