use anyhow::{Result, bail};
use std::{env, path::PathBuf};
use tracing::info;
use utils::errors::NOTIFIER_STATE_FILE_EMPTY;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.stackexchange.com/2.3/search";
pub const DEFAULT_STATE_FILE: &str = "state.txt";
pub const DEFAULT_TAG: &str = "open-telemetry";
pub const DEFAULT_SITE: &str = "stackoverflow";

/// Process-wide settings, resolved once at startup and handed to each component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Incoming webhook; `None` switches the publisher to log-only delivery.
    pub webhook_url: Option<String>,
    pub state_file: PathBuf,
    pub search_endpoint: String,
    /// Tag the search is filtered on. Also dropped from the displayed tag list.
    pub tag: String,
    pub site: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            tag: DEFAULT_TAG.to_string(),
            site: DEFAULT_SITE.to_string(),
        }
    }
}

impl NotifierConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let webhook_url = env::var("SLACK_WEBHOOK_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let state_file = match env::var("NOTIFIER_STATE_FILE") {
            Ok(path) if path.trim().is_empty() => bail!(NOTIFIER_STATE_FILE_EMPTY),
            Ok(path) => PathBuf::from(path),
            Err(_) => defaults.state_file,
        };

        let config = Self {
            webhook_url,
            state_file,
            search_endpoint: non_empty_var("STACKEXCHANGE_API_URL")
                .unwrap_or(defaults.search_endpoint),
            tag: non_empty_var("NOTIFIER_TAG").unwrap_or(defaults.tag),
            site: non_empty_var("NOTIFIER_SITE").unwrap_or(defaults.site),
        };

        info!(
            webhook_configured = config.webhook_url.is_some(),
            state_file = %config.state_file.display(),
            search_endpoint = %config.search_endpoint,
            tag = %config.tag,
            site = %config.site,
            "Notifier config loaded"
        );

        Ok(config)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
