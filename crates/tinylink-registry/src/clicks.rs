use std::sync::Arc;
use tinylink_core::{Registry, RegistryError, ShortCode};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Records clicks off the request path.
///
/// A redirect should not wait on a counter update, so each click runs on its
/// own task. Failures are logged and otherwise dropped.
#[derive(Clone)]
pub struct ClickRecorder {
    registry: Arc<dyn Registry>,
}

impl ClickRecorder {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    /// Spawns a task that records one click for `code`.
    ///
    /// Must be called from within a tokio runtime. The returned handle may be
    /// dropped; the task keeps running.
    pub fn dispatch(&self, code: ShortCode) -> JoinHandle<()> {
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            match registry.record_click(&code).await {
                Ok(()) => trace!(code = %code, "click recorded"),
                // deleted between resolve and click
                Err(RegistryError::NotFound(_)) => {
                    debug!(code = %code, "click for vanished link dropped")
                }
                Err(err) => warn!(code = %code, error = %err, "failed to record click"),
            }
        })
    }
}
