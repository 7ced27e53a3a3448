use crate::{
    config::NotifierConfig,
    formatter::format_question,
    publisher::{Delivery, Publisher},
    stackexchange_api::StackExchangeApi,
    watermark::WatermarkStore,
};
use anyhow::{Context, Result};
use tracing::{error, info, instrument};
use utils::errors::{WATERMARK_READ_FAILED, WATERMARK_WRITE_FAILED};

/// Outcome of one successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub previous_watermark: u64,
    pub watermark: u64,
    pub fetched: usize,
    pub published: usize,
    pub logged: usize,
}

pub fn advance_watermark(current: u64, candidate: u64) -> u64 {
    current.max(candidate)
}

pub struct Notifier {
    store: WatermarkStore,
    api: StackExchangeApi,
    publisher: Publisher,
    tag: String,
}

impl Notifier {
    pub fn new(config: &NotifierConfig) -> Result<Self> {
        Ok(Self::from_parts(
            WatermarkStore::new(&config.state_file),
            StackExchangeApi::new(config)?,
            Publisher::new(config.webhook_url.clone()),
        ))
    }

    pub fn from_parts(store: WatermarkStore, api: StackExchangeApi, publisher: Publisher) -> Self {
        let tag = api.tag().to_string();
        Self {
            store,
            api,
            publisher,
            tag,
        }
    }

    /// Relays every question newer than the stored watermark, then advances it.
    /// Any failure returns before the watermark is written, so the next run
    /// retries the same window.
    #[instrument(name = "notifier_run", skip(self), fields(state_file = %self.store.path().display()))]
    pub async fn run(&self) -> Result<RunSummary> {
        let previous_watermark = self.store.read().context(WATERMARK_READ_FAILED)?;
        info!(watermark = previous_watermark, "Loaded watermark");

        let questions = self
            .api
            .fetch_questions(previous_watermark)
            .await
            .inspect_err(|e| error!(watermark = previous_watermark, "Fetching questions failed: {:?}", e))?;

        let mut summary = RunSummary {
            previous_watermark,
            watermark: previous_watermark,
            fetched: questions.len(),
            ..Default::default()
        };

        for question in &questions {
            let message = format_question(question, &self.tag);
            let delivery = self.publisher.publish(&message).await.inspect_err(|e| {
                error!(
                    link = %question.link,
                    published = summary.published + summary.logged,
                    remaining = summary.fetched - summary.published - summary.logged,
                    "Publishing question failed, watermark left at {}: {:?}",
                    previous_watermark,
                    e
                )
            })?;

            match delivery {
                Delivery::Posted => summary.published += 1,
                Delivery::Logged => summary.logged += 1,
            }
            summary.watermark = advance_watermark(summary.watermark, question.creation_date);
        }

        self.store
            .write(summary.watermark)
            .context(WATERMARK_WRITE_FAILED)?;

        info!(
            fetched = summary.fetched,
            published = summary.published,
            logged = summary.logged,
            previous_watermark = summary.previous_watermark,
            watermark = summary.watermark,
            "Run complete"
        );

        Ok(summary)
    }
}
