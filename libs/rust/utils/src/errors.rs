//env
pub const NOTIFIER_STATE_FILE_EMPTY: &str = "NOTIFIER_STATE_FILE is set but empty!";

//stackexchange
pub const SEARCH_CLIENT_BUILD_FAILED: &str = "Failed to build Stack Exchange HTTP client";
pub const SEARCH_REQUEST_FAILED: &str = "Failed to send Stack Exchange search request";
pub const SEARCH_RESPONSE_READ_FAILED: &str = "Failed to read Stack Exchange search response";
pub const SEARCH_RESPONSE_PARSE_FAILED: &str = "Failed to parse Stack Exchange search response";

//webhook
pub const WEBHOOK_SERIALIZE_FAILED: &str = "Failed to serialize webhook message";
pub const WEBHOOK_POST_FAILED: &str = "Failed to post message to webhook";

//state
pub const WATERMARK_READ_FAILED: &str = "Failed to read watermark";
pub const WATERMARK_WRITE_FAILED: &str = "Failed to persist watermark";
