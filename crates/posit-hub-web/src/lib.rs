//! posit-hub-web — Web UI for the Posit Connect RAG Agent shell.
//! Serves a single page with four panels (chat, upload, search, help) and
//! drives one reactive session per connected browser:
//!   - `GET /session/events` opens the session and streams output updates
//!   - `POST /session/{id}/input` applies text, choice and click updates
//!   - `POST /session/{id}/upload/{input}` replaces the file selection

pub mod router;
pub mod handlers;
pub mod state;
pub mod store;
pub mod sse;
pub mod templates;
