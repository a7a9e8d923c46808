use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tinylink_core::{ShortLink, ShortenParams};

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(alias = "url")]
    pub target: String,
    #[serde(default)]
    pub custom_code: Option<String>,
}

impl From<CreateLinkRequest> for ShortenParams {
    fn from(request: CreateLinkRequest) -> Self {
        Self {
            target: request.target,
            custom_code: request.custom_code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub short_url: String,
    pub target: String,
    pub created_at: Timestamp,
    pub clicks: u64,
}

impl LinkResponse {
    pub fn from_link(link: ShortLink, base_url: &str) -> Self {
        Self {
            id: link.id,
            short_url: link.code.to_url(base_url),
            code: link.code.to_string(),
            target: link.target,
            created_at: link.created_at,
            clicks: link.clicks,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListLinksResponse {
    pub links: Vec<LinkResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
