use std::sync::Arc;
use tinylink_core::Registry;
use tinylink_registry::ClickRecorder;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn Registry>,
    pub clicks: ClickRecorder,
    pub base_url: String,
}

impl AppState {
    pub fn new(registry: Arc<dyn Registry>, public_base_url: impl Into<String>) -> Self {
        Self {
            clicks: ClickRecorder::new(Arc::clone(&registry)),
            registry,
            base_url: public_base_url.into(),
        }
    }
}
