//! One browser connection's reactive state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use posit_hub_common::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::controls::{CHAT_INPUT, SEARCH_BTN, SEARCH_INPUT, SECTION, SEND_CHAT, UPLOAD_DOCS};
use crate::graph::ReactiveGraph;
use crate::renderers::{ChatResponse, SearchResults, UploadStatus};
use crate::section::{self, Panel, Section};
use crate::value::{FileDescriptor, InputValue};

/// A change sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputUpdate {
    Text { id: String, value: String },
    Choice { id: String, value: String },
    Click { id: String },
    Files { id: String, files: Vec<FileDescriptor> },
}

impl InputUpdate {
    pub fn id(&self) -> &str {
        match self {
            InputUpdate::Text { id, .. }
            | InputUpdate::Choice { id, .. }
            | InputUpdate::Click { id }
            | InputUpdate::Files { id, .. } => id,
        }
    }
}

/// Pushed to the client over the session's event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Connected { session_id: Uuid },
    Output { id: String, value: String },
    Visibility { section: Section },
}

impl SessionEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Connected { .. }  => "connected",
            SessionEvent::Output { .. }     => "output",
            SessionEvent::Visibility { .. } => "visibility",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub section: Section,
    pub panels: [Panel; 4],
    pub inputs: BTreeMap<String, InputValue>,
    pub outputs: BTreeMap<String, String>,
}

pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    graph: ReactiveGraph,
}

impl Session {
    /// Build the page's input/output graph and render the initial (empty) outputs.
    pub fn new(id: Uuid) -> Result<Self> {
        let mut graph = ReactiveGraph::new();
        graph.add_input(SECTION, InputValue::Choice(Section::default().as_str().to_string()))?;
        graph.add_input(CHAT_INPUT, InputValue::Text(String::new()))?;
        graph.add_input(SEND_CHAT, InputValue::Counter(0))?;
        graph.add_input(UPLOAD_DOCS, InputValue::Files(Vec::new()))?;
        graph.add_input(SEARCH_INPUT, InputValue::Text(String::new()))?;
        graph.add_input(SEARCH_BTN, InputValue::Counter(0))?;

        graph.add_output(ChatResponse)?;
        graph.add_output(UploadStatus)?;
        graph.add_output(SearchResults)?;
        graph.flush();

        Ok(Self { id, created_at: Utc::now(), graph })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Events that bring a freshly connected client up to date.
    pub fn initial_events(&self) -> Vec<SessionEvent> {
        let mut events = vec![SessionEvent::Connected { session_id: self.id }];
        events.extend(self.graph.outputs().map(|(id, value)| SessionEvent::Output {
            id: id.to_string(),
            value: value.to_string(),
        }));
        events.push(SessionEvent::Visibility { section: self.section() });
        events
    }

    /// Apply one client update and return the events to push.
    pub fn apply(&mut self, update: InputUpdate) -> Result<Vec<SessionEvent>> {
        let before = self.section();

        match update {
            InputUpdate::Text { id, value } => {
                self.graph.set_input(&id, InputValue::Text(value))?;
            }
            InputUpdate::Choice { id, value } => {
                if id == SECTION {
                    value.parse::<Section>()?;
                }
                self.graph.set_input(&id, InputValue::Choice(value))?;
            }
            InputUpdate::Click { id } => {
                self.graph.click(&id)?;
            }
            InputUpdate::Files { id, files } => {
                tracing::debug!(session = %self.id, count = files.len(), "File selection replaced");
                self.graph.set_input(&id, InputValue::Files(files))?;
            }
        }

        let mut events: Vec<SessionEvent> = self
            .graph
            .flush()
            .into_iter()
            .map(|u| SessionEvent::Output { id: u.id, value: u.value })
            .collect();

        let after = self.section();
        if after != before {
            events.push(SessionEvent::Visibility { section: after });
        }
        Ok(events)
    }

    /// Active section, read from the `section` input.
    pub fn section(&self) -> Section {
        match self.graph.input(SECTION) {
            Some(InputValue::Choice(value)) => value.parse().unwrap_or_default(),
            _ => Section::default(),
        }
    }

    pub fn panels(&self) -> [Panel; 4] {
        section::panels(self.section())
    }

    pub fn output(&self, id: &str) -> Option<&str> {
        self.graph.output(id)
    }

    pub fn input(&self, id: &str) -> Option<&InputValue> {
        self.graph.input(id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            created_at: self.created_at,
            section: self.section(),
            panels: self.panels(),
            inputs: self.graph.inputs().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            outputs: self.graph.outputs().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }
}
