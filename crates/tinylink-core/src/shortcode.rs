use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The unique, case-sensitive key of a [`ShortLink`](crate::ShortLink).
///
/// Generated codes are drawn from `[A-Za-z0-9]`. Custom codes are taken
/// verbatim; they must be non-empty and at most [`MAX_CODE_LENGTH`]
/// characters. Deserialization applies the same checks.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

/// Longest code, in characters, that every storage backend can hold.
pub const MAX_CODE_LENGTH: usize = 255;

impl ShortCode {
    /// Creates a new `ShortCode`, rejecting empty or over-long input.
    pub fn new(code: impl Into<String>) -> Result<Self, RegistryError> {
        let code = code.into();
        if code.is_empty() {
            return Err(RegistryError::InvalidInput(
                "short code cannot be empty".to_string(),
            ));
        }
        if code.chars().count() > MAX_CODE_LENGTH {
            return Err(RegistryError::InvalidInput(format!(
                "short code exceeds {MAX_CODE_LENGTH} characters"
            )));
        }
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (generators, rows read back from storage).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of bytes in the code.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShortCode {
    type Error = RegistryError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<ShortCode> for String {
    fn from(code: ShortCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
