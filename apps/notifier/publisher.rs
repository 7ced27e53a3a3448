use crate::models::messages::Message;
use anyhow::{Context, Result, anyhow};
use reqwest::{Client, header::CONTENT_TYPE};
use tracing::{debug, info};
use utils::errors::{WEBHOOK_POST_FAILED, WEBHOOK_SERIALIZE_FAILED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Posted,
    /// No webhook configured; the message went to the log instead.
    Logged,
}

pub struct Publisher {
    client: Client,
    webhook_url: Option<String>,
}

impl Publisher {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    pub fn is_log_only(&self) -> bool {
        self.webhook_url.is_none()
    }

    pub async fn publish(&self, message: &Message) -> Result<Delivery> {
        let payload = serde_json::to_string(message).context(WEBHOOK_SERIALIZE_FAILED)?;

        let Some(webhook_url) = &self.webhook_url else {
            info!(title = %message.text, payload = %payload, "No webhook configured, logging message");
            return Ok(Delivery::Logged);
        };

        let response = self
            .client
            .post(webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .context(WEBHOOK_POST_FAILED)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Webhook error: status={}, body={}",
                status,
                text
            ));
        }

        debug!(title = %message.text, "Message posted to webhook");
        Ok(Delivery::Posted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::messages::{Block, TextObject};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn message(title: &str) -> Message {
        Message {
            text: title.to_string(),
            blocks: vec![
                Block::Header {
                    text: TextObject::plain("New StackOverflow Question"),
                },
                Block::Divider,
            ],
        }
    }

    #[tokio::test]
    async fn test_posts_json_to_webhook() {
        let mut server = Server::new_async().await;
        let publisher = Publisher::new(Some(format!("{}/services/T000/B000", server.url())));

        let mock = server
            .mock("POST", "/services/T000/B000")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "text": "Exporter timeout",
                "blocks": [
                    {
                        "type": "header",
                        "text": { "type": "plain_text", "text": "New StackOverflow Question", "emoji": true }
                    },
                    { "type": "divider" }
                ]
            })))
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let delivery = publisher.publish(&message("Exporter timeout")).await.unwrap();

        assert_eq!(delivery, Delivery::Posted);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_fails_publish() {
        let mut server = Server::new_async().await;
        let publisher = Publisher::new(Some(server.url()));

        let mock = server
            .mock("POST", "/")
            .with_status(404)
            .with_body("no_service")
            .create_async()
            .await;

        let err = publisher.publish(&message("Exporter timeout")).await.unwrap_err();

        assert!(err.to_string().contains("no_service"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_without_webhook_logs_instead() {
        let publisher = Publisher::new(None);

        assert!(publisher.is_log_only());
        let delivery = publisher.publish(&message("Exporter timeout")).await.unwrap();

        assert_eq!(delivery, Delivery::Logged);
    }
}
