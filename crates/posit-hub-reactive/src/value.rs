//! Values held by input nodes.

use serde::{Deserialize, Serialize};

/// One file from the picker. Only the name and byte count are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), size }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Choice,
    Counter,
    Files,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Text    => "text",
            InputKind::Choice  => "choice",
            InputKind::Counter => "counter",
            InputKind::Files   => "files",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InputValue {
    Text(String),
    Choice(String),
    /// Button clicks since session start.
    Counter(u64),
    Files(Vec<FileDescriptor>),
}

impl InputValue {
    pub fn kind(&self) -> InputKind {
        match self {
            InputValue::Text(_)    => InputKind::Text,
            InputValue::Choice(_)  => InputKind::Choice,
            InputValue::Counter(_) => InputKind::Counter,
            InputValue::Files(_)   => InputKind::Files,
        }
    }
}
