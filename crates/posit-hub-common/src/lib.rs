//! posit-hub-common — Shared error type used across all Posit Hub crates.

pub mod error;

pub use error::{HubError, Result};
