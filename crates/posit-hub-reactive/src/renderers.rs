//! Placeholder renderers for the three output regions.
//!
//! None of them do retrieval or model calls; each echoes its input in a fixed
//! format once the user has acted, and renders nothing before that.

use crate::controls::{
    CHAT_INPUT, CHAT_RESPONSE, SEARCH_BTN, SEARCH_INPUT, SEARCH_RESULTS, SEND_CHAT, UPLOAD_DOCS,
    UPLOAD_STATUS,
};
use crate::graph::{InputReader, Renderer};
use crate::value::FileDescriptor;

pub fn chat_response(query: &str, submit_count: u64) -> String {
    if submit_count == 0 {
        return String::new();
    }
    format!("[Placeholder] You asked: {query}")
}

pub fn upload_status(files: &[FileDescriptor]) -> String {
    if files.is_empty() {
        return String::new();
    }
    format!("[Placeholder] Uploaded {} file(s).", files.len())
}

pub fn search_results(query: &str, submit_count: u64) -> String {
    if submit_count == 0 {
        return String::new();
    }
    format!("[Placeholder] Search for: {query}")
}

/// Re-renders on `send_chat` clicks only; the query text is read untracked.
pub struct ChatResponse;

impl Renderer for ChatResponse {
    fn name(&self) -> &str { CHAT_RESPONSE }
    fn depends_on(&self) -> &[&'static str] { &[SEND_CHAT] }
    fn render(&self, inputs: &InputReader<'_>) -> String {
        chat_response(inputs.text(CHAT_INPUT), inputs.counter(SEND_CHAT))
    }
}

pub struct UploadStatus;

impl Renderer for UploadStatus {
    fn name(&self) -> &str { UPLOAD_STATUS }
    fn depends_on(&self) -> &[&'static str] { &[UPLOAD_DOCS] }
    fn render(&self, inputs: &InputReader<'_>) -> String {
        upload_status(inputs.files(UPLOAD_DOCS))
    }
}

/// Re-renders on `search_btn` clicks only.
pub struct SearchResults;

impl Renderer for SearchResults {
    fn name(&self) -> &str { SEARCH_RESULTS }
    fn depends_on(&self) -> &[&'static str] { &[SEARCH_BTN] }
    fn render(&self, inputs: &InputReader<'_>) -> String {
        search_results(inputs.text(SEARCH_INPUT), inputs.counter(SEARCH_BTN))
    }
}
