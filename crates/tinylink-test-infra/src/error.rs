use thiserror::Error;

/// Failures while starting or inspecting a test container.
#[derive(Debug, Error)]
pub enum TestInfraError {
    /// Docker is unreachable, the image could not be pulled, or the
    /// container never reported readiness.
    #[error("test container failed: {0}")]
    Container(#[from] testcontainers::TestcontainersError),
}

pub type Result<T, E = TestInfraError> = std::result::Result<T, E>;
