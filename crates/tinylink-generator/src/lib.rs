pub mod random;

pub use random::{RandomGenerator, ALPHABET, DEFAULT_CODE_LENGTH};

use tinylink_core::ShortCode;

/// Trait for generating candidate short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// A candidate may collide with an existing code; the registry checks
/// persistence and asks again.
pub trait Generator: Send + Sync + 'static {
    /// Produces a candidate code of exactly `length` characters.
    fn generate(&self, length: usize) -> ShortCode;
}

impl<G: Generator> Generator for std::sync::Arc<G> {
    fn generate(&self, length: usize) -> ShortCode {
        (**self).generate(length)
    }
}
