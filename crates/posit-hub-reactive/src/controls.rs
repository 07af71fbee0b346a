//! Control identifiers shared by the page template, the client script and the session graph.

pub const SECTION: &str = "section";

pub const CHAT_INPUT: &str = "chat_input";
pub const SEND_CHAT: &str = "send_chat";
pub const CHAT_RESPONSE: &str = "chat_response";

pub const UPLOAD_DOCS: &str = "upload_docs";
pub const UPLOAD_STATUS: &str = "upload_status";

pub const SEARCH_INPUT: &str = "search_input";
pub const SEARCH_BTN: &str = "search_btn";
pub const SEARCH_RESULTS: &str = "search_results";

/// Output regions in page order.
pub const OUTPUTS: [&str; 3] = [CHAT_RESPONSE, UPLOAD_STATUS, SEARCH_RESULTS];
