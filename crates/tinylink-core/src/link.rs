use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A persisted mapping from a short code to its target URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    /// Identifier assigned by persistence on creation.
    pub id: i64,
    /// The unique short code.
    pub code: ShortCode,
    /// Normalized absolute target URL.
    pub target: String,
    /// When the link was created. Never changes afterwards.
    pub created_at: Timestamp,
    /// Number of recorded clicks.
    pub clicks: u64,
}

/// The payload of an insert; persistence assigns `id` and starts `clicks` at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: ShortCode,
    pub target: String,
    pub created_at: Timestamp,
}

impl NewLink {
    pub fn new(code: ShortCode, target: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            code,
            target: target.into(),
            created_at,
        }
    }

    /// Materializes the stored record once persistence has assigned an id.
    pub fn into_link(self, id: i64) -> ShortLink {
        ShortLink {
            id,
            code: self.code,
            target: self.target,
            created_at: self.created_at,
            clicks: 0,
        }
    }
}

/// Orders links newest first, breaking timestamp ties by descending id.
pub fn newest_first(a: &ShortLink, b: &ShortLink) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
