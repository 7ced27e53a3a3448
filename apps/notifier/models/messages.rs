use serde::Serialize;

/// Webhook payload: fallback text plus the block layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub text: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: TextObject },
    Section { text: TextObject },
    Divider,
    Context { elements: Vec<TextObject> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText { text: String, emoji: bool },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        TextObject::PlainText {
            text: text.into(),
            emoji: true,
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        TextObject::Mrkdwn { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_webhook_layout() {
        let message = Message {
            text: "Title".to_string(),
            blocks: vec![
                Block::Header {
                    text: TextObject::plain("New StackOverflow Question"),
                },
                Block::Section {
                    text: TextObject::mrkdwn("<https://x|Title>"),
                },
                Block::Divider,
                Block::Context {
                    elements: vec![TextObject::mrkdwn("Posted at 2024-06-10 06:15:00")],
                },
            ],
        };

        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(
            value,
            json!({
                "text": "Title",
                "blocks": [
                    {
                        "type": "header",
                        "text": { "type": "plain_text", "text": "New StackOverflow Question", "emoji": true }
                    },
                    {
                        "type": "section",
                        "text": { "type": "mrkdwn", "text": "<https://x|Title>" }
                    },
                    { "type": "divider" },
                    {
                        "type": "context",
                        "elements": [{ "type": "mrkdwn", "text": "Posted at 2024-06-10 06:15:00" }]
                    }
                ]
            })
        );
    }
}
