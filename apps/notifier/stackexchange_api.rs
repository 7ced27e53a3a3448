use crate::{
    config::NotifierConfig,
    models::questions::{Question, SearchResponse},
};
use anyhow::{Context, Result, anyhow};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::{debug, info, instrument, warn};
use utils::errors::{
    SEARCH_CLIENT_BUILD_FAILED, SEARCH_REQUEST_FAILED, SEARCH_RESPONSE_PARSE_FAILED,
    SEARCH_RESPONSE_READ_FAILED,
};

const NOTIFIER_USER_AGENT: &str = concat!("tagged-question-notifier/", env!("CARGO_PKG_VERSION"));

/// Query string for one search call. `min` is inclusive on the API side, so it
/// is set one past the watermark and left out entirely on a fresh start.
pub fn search_params(
    tag: &str,
    site: &str,
    min_timestamp: u64,
) -> Result<Vec<(&'static str, String)>> {
    let mut params = vec![
        ("tagged", tag.to_string()),
        ("sort", "creation".to_string()),
        ("site", site.to_string()),
    ];
    if min_timestamp > 0 {
        let min = min_timestamp
            .checked_add(1)
            .ok_or_else(|| anyhow!("Watermark {} has no successor timestamp", min_timestamp))?;
        params.push(("min", min.to_string()));
    }
    Ok(params)
}

pub struct StackExchangeApi {
    client: Client,
    endpoint: String,
    tag: String,
    site: String,
}

impl StackExchangeApi {
    pub fn new(config: &NotifierConfig) -> Result<Self> {
        Self::with_settings(&config.search_endpoint, &config.tag, &config.site)
    }

    pub fn new_with_endpoint(endpoint: String) -> Result<Self> {
        let defaults = NotifierConfig::default();
        Self::with_settings(&endpoint, &defaults.tag, &defaults.site)
    }

    fn with_settings(endpoint: &str, tag: &str, site: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(NOTIFIER_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()
            .context(SEARCH_CLIENT_BUILD_FAILED)?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            tag: tag.to_string(),
            site: site.to_string(),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Questions created strictly after `min_timestamp`, in the order the API returned them.
    #[instrument(name = "fetch_questions", skip(self), fields(tag = %self.tag))]
    pub async fn fetch_questions(&self, min_timestamp: u64) -> Result<Vec<Question>> {
        let params = search_params(&self.tag, &self.site, min_timestamp)?;
        debug!(endpoint = %self.endpoint, ?params, "Searching for new questions");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .context(SEARCH_REQUEST_FAILED)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Stack Exchange API error: status={}, body={}",
                status,
                text
            ));
        }

        let body = response.text().await.context(SEARCH_RESPONSE_READ_FAILED)?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).context(SEARCH_RESPONSE_PARSE_FAILED)?;

        if let Some(error_name) = &parsed.error_name {
            warn!(
                error_id = ?parsed.error_id,
                error_name = %error_name,
                error_message = ?parsed.error_message,
                "Stack Exchange API reported an error in a successful response"
            );
        }
        if parsed.has_more {
            warn!(
                returned = parsed.items.len(),
                "More questions are available than one page returns; the rest wait for the next run"
            );
        }
        if let Some(backoff) = parsed.backoff {
            warn!(backoff_seconds = backoff, "Stack Exchange API requested a backoff");
        }

        info!(
            count = parsed.items.len(),
            quota_remaining = ?parsed.quota_remaining,
            "Fetched questions"
        );

        Ok(parsed.items)
    }
}
