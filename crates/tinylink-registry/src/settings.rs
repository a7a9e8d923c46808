use tinylink_core::{RegistryError, MAX_CODE_LENGTH};
use tinylink_generator::DEFAULT_CODE_LENGTH;
use typed_builder::TypedBuilder;

/// Tuning for short-code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct RegistrySettings {
    /// Length of generated codes.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
    /// Candidates tried per code length before widening.
    #[builder(default = 10)]
    pub max_attempts: u32,
    /// How many extra characters generation may widen to once a length is
    /// exhausted.
    #[builder(default = 2)]
    pub max_widening: usize,
}

impl RegistrySettings {
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.code_length == 0 {
            return Err(RegistryError::InvalidInput(
                "code length must be at least 1".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(RegistryError::InvalidInput(
                "max attempts must be at least 1".to_string(),
            ));
        }
        if self.max_code_length() > MAX_CODE_LENGTH {
            return Err(RegistryError::InvalidInput(format!(
                "generated codes may not exceed {MAX_CODE_LENGTH} characters"
            )));
        }
        Ok(())
    }

    /// Longest code generation will fall back to.
    pub fn max_code_length(&self) -> usize {
        self.code_length + self.max_widening
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
