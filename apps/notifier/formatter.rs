use crate::models::{
    messages::{Block, Message, TextObject},
    questions::Question,
};
use chrono::{Local, TimeZone};

pub const HEADER_TEXT: &str = "New StackOverflow Question";
const POSTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Builds the chat message for one question. `excluded_tag` is the search tag,
/// which every relayed question carries and so is left out of the tag line.
pub fn format_question(question: &Question, excluded_tag: &str) -> Message {
    let title = escape_mrkdwn(&html_escape::decode_html_entities(&question.title));
    let tags = display_tags(&question.tags, excluded_tag);

    let section = format!("<{}|{}>\n*Tags:* {}", question.link, title, tags);

    Message {
        text: title,
        blocks: vec![
            Block::Header {
                text: TextObject::plain(HEADER_TEXT),
            },
            Block::Section {
                text: TextObject::mrkdwn(section),
            },
            Block::Divider,
            Block::Context {
                elements: vec![TextObject::mrkdwn(format!(
                    "Posted at {}",
                    posted_at(question.creation_date)
                ))],
            },
        ],
    }
}

pub fn display_tags(tags: &[String], excluded_tag: &str) -> String {
    tags.iter()
        .filter(|tag| tag.as_str() != excluded_tag)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Local-time rendering of a unix timestamp. Out-of-range values fall back to the raw number.
pub fn posted_at(creation_date: u64) -> String {
    i64::try_from(creation_date)
        .ok()
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map(|dt| dt.format(POSTED_AT_FORMAT).to_string())
        .unwrap_or_else(|| creation_date.to_string())
}

// Control characters in the chat markup.
fn escape_mrkdwn(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
