use serde::{Deserialize, Serialize};

/// Envelope returned by the Stack Exchange `/search` endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<Question>,
    #[serde(default)]
    pub has_more: bool,
    pub quota_remaining: Option<u32>,
    pub backoff: Option<u64>,
    pub error_id: Option<u32>,
    pub error_name: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub title: String,
    pub link: String,
    pub tags: Vec<String>,
    pub creation_date: u64,
}
