use crate::Generator;
use rand::distr::Alphanumeric;
use rand::Rng;
use tinylink_core::ShortCode;

/// The 62 symbols of [`rand::distr::Alphanumeric`], which [`RandomGenerator`]
/// samples. Listed here for callers that validate or describe codes.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Draws codes uniformly from [`ALPHABET`].
///
/// Uses the thread-local generator, a periodically reseeded ChaCha CSPRNG,
/// so codes are not predictable from previously issued ones. With 62^6
/// (about 5.7e10) codes at the default length collisions are rare but
/// possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    fn generate(&self, length: usize) -> ShortCode {
        let code: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(length)
            .map(char::from)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
