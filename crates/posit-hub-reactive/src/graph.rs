//! Explicit reactive dependency graph.
//!
//! Every input node carries a version counter that moves only when its value
//! changes. Every output node is a [`Renderer`] that declares the inputs it
//! depends on. [`ReactiveGraph::flush`] re-renders an output exactly when one
//! of its declared dependency versions differs from the versions it saw on its
//! previous run (or when it has never run).
//!
//! A renderer may read inputs it does not declare. Such reads are untracked:
//! the output sees the current value but does not re-run when it changes.

use std::collections::BTreeMap;

use posit_hub_common::{HubError, Result};
use serde::{Deserialize, Serialize};

use crate::value::{FileDescriptor, InputKind, InputValue};

// ─────────────────────────────────────────────
//  Renderer trait — one per output region
// ─────────────────────────────────────────────

/// A pure function from input values to the text of one output region.
pub trait Renderer: Send + Sync {
    /// Output identifier, unique within a graph.
    fn name(&self) -> &str;

    /// Inputs whose changes trigger a re-render.
    fn depends_on(&self) -> &[&'static str];

    fn render(&self, inputs: &InputReader<'_>) -> String;
}

// ─────────────────────────────────────────────
//  Nodes
// ─────────────────────────────────────────────

#[derive(Debug)]
struct InputNode {
    kind: InputKind,
    value: InputValue,
    version: u64,
}

struct OutputNode {
    renderer: Box<dyn Renderer>,
    /// Dependency versions observed on the last render, `None` before the first one.
    seen: Option<Vec<u64>>,
    value: String,
}

/// An output that was re-rendered by a flush.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputUpdate {
    pub id: String,
    pub value: String,
}

/// Read-only view of the inputs handed to renderers.
///
/// The typed getters return an empty value for unknown ids or mismatched kinds,
/// keeping renderers total.
pub struct InputReader<'a> {
    inputs: &'a BTreeMap<String, InputNode>,
}

impl<'a> InputReader<'a> {
    pub fn get(&self, id: &str) -> Option<&'a InputValue> {
        self.inputs.get(id).map(|node| &node.value)
    }

    pub fn text(&self, id: &str) -> &'a str {
        match self.get(id) {
            Some(InputValue::Text(s)) | Some(InputValue::Choice(s)) => s,
            _ => "",
        }
    }

    pub fn counter(&self, id: &str) -> u64 {
        match self.get(id) {
            Some(InputValue::Counter(n)) => *n,
            _ => 0,
        }
    }

    pub fn files(&self, id: &str) -> &'a [FileDescriptor] {
        match self.get(id) {
            Some(InputValue::Files(files)) => files,
            _ => &[],
        }
    }
}

// ─────────────────────────────────────────────
//  Graph
// ─────────────────────────────────────────────

#[derive(Default)]
pub struct ReactiveGraph {
    inputs: BTreeMap<String, InputNode>,
    outputs: Vec<OutputNode>,
}

impl ReactiveGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an input node. Its kind is fixed by the initial value.
    pub fn add_input(&mut self, id: impl Into<String>, initial: InputValue) -> Result<()> {
        let id = id.into();
        if self.inputs.contains_key(&id) {
            return Err(HubError::Graph(format!("duplicate input: {id}")));
        }
        self.inputs.insert(id, InputNode { kind: initial.kind(), value: initial, version: 0 });
        Ok(())
    }

    /// Register an output. All declared dependencies must already exist.
    pub fn add_output<R: Renderer + 'static>(&mut self, renderer: R) -> Result<()> {
        let name = renderer.name().to_string();
        if self.outputs.iter().any(|o| o.renderer.name() == name) {
            return Err(HubError::Graph(format!("duplicate output: {name}")));
        }
        if let Some(missing) = renderer.depends_on().iter().find(|d| !self.inputs.contains_key(**d)) {
            return Err(HubError::Graph(format!("output {name} depends on unknown input {missing}")));
        }
        self.outputs.push(OutputNode { renderer: Box::new(renderer), seen: None, value: String::new() });
        Ok(())
    }

    /// Replace an input value. Returns whether the value (and so its version) changed.
    pub fn set_input(&mut self, id: &str, value: InputValue) -> Result<bool> {
        let node = self.input_mut(id, value.kind())?;
        if node.value == value {
            return Ok(false);
        }
        node.value = value;
        node.version += 1;
        Ok(true)
    }

    /// Increment a counter input. Every click is a change.
    pub fn click(&mut self, id: &str) -> Result<u64> {
        let node = self.input_mut(id, InputKind::Counter)?;
        match &mut node.value {
            InputValue::Counter(count) => {
                *count += 1;
                node.version += 1;
                Ok(*count)
            }
            other => Err(HubError::InputKindMismatch {
                id: id.to_string(),
                expected: InputKind::Counter.as_str(),
                got: other.kind().as_str(),
            }),
        }
    }

    fn input_mut(&mut self, id: &str, kind: InputKind) -> Result<&mut InputNode> {
        let node = self
            .inputs
            .get_mut(id)
            .ok_or_else(|| HubError::UnknownInput(id.to_string()))?;
        if node.kind != kind {
            return Err(HubError::InputKindMismatch {
                id: id.to_string(),
                expected: node.kind.as_str(),
                got: kind.as_str(),
            });
        }
        Ok(node)
    }

    /// Re-render every stale output, in registration order.
    pub fn flush(&mut self) -> Vec<OutputUpdate> {
        let reader = InputReader { inputs: &self.inputs };
        let mut updates = Vec::new();

        for node in &mut self.outputs {
            let current: Vec<u64> = node
                .renderer
                .depends_on()
                .iter()
                .map(|dep| reader.inputs.get(*dep).map_or(0, |n| n.version))
                .collect();

            if node.seen.as_ref() == Some(&current) {
                continue;
            }

            node.value = node.renderer.render(&reader);
            tracing::debug!(output = node.renderer.name(), versions = ?current, "Output recomputed");
            node.seen = Some(current);
            updates.push(OutputUpdate { id: node.renderer.name().to_string(), value: node.value.clone() });
        }

        updates
    }

    pub fn input(&self, id: &str) -> Option<&InputValue> {
        self.inputs.get(id).map(|n| &n.value)
    }

    #[cfg(test)]
    fn version(&self, id: &str) -> Option<u64> {
        self.inputs.get(id).map(|n| n.version)
    }

    /// Last rendered value of an output.
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.renderer.name() == name)
            .map(|o| o.value.as_str())
    }

    pub fn inputs(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.inputs.iter().map(|(id, n)| (id.as_str(), &n.value))
    }

    pub fn outputs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outputs.iter().map(|o| (o.renderer.name(), o.value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Echoes `name` whenever `trigger` moves; counts its own runs.
    struct Echo {
        runs: Arc<AtomicUsize>,
    }

    impl Renderer for Echo {
        fn name(&self) -> &str { "echo" }
        fn depends_on(&self) -> &[&'static str] { &["trigger"] }
        fn render(&self, inputs: &InputReader<'_>) -> String {
            self.runs.fetch_add(1, Ordering::SeqCst);
            format!("{}:{}", inputs.text("name"), inputs.counter("trigger"))
        }
    }

    fn graph_with_echo() -> (ReactiveGraph, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut graph = ReactiveGraph::new();
        graph.add_input("name", InputValue::Text(String::new())).unwrap();
        graph.add_input("trigger", InputValue::Counter(0)).unwrap();
        graph.add_output(Echo { runs: runs.clone() }).unwrap();
        (graph, runs)
    }

    #[test]
    fn test_first_flush_renders_everything() {
        let (mut graph, runs) = graph_with_echo();
        let updates = graph.flush();
        assert_eq!(updates, vec![OutputUpdate { id: "echo".into(), value: ":0".into() }]);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_flush_without_changes_is_noop() {
        let (mut graph, runs) = graph_with_echo();
        graph.flush();
        assert!(graph.flush().is_empty());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_untracked_input_does_not_trigger() {
        let (mut graph, runs) = graph_with_echo();
        graph.flush();
        assert!(graph.set_input("name", InputValue::Text("ada".into())).unwrap());
        assert!(graph.flush().is_empty());
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        graph.click("trigger").unwrap();
        let updates = graph.flush();
        assert_eq!(updates[0].value, "ada:1");
        assert_eq!(graph.output("echo"), Some("ada:1"));
    }

    #[test]
    fn test_set_same_value_keeps_version() {
        let (mut graph, _) = graph_with_echo();
        assert!(graph.set_input("name", InputValue::Text("x".into())).unwrap());
        assert_eq!(graph.version("name"), Some(1));
        assert!(!graph.set_input("name", InputValue::Text("x".into())).unwrap());
        assert_eq!(graph.version("name"), Some(1));
    }

    #[test]
    fn test_click_always_bumps() {
        let (mut graph, _) = graph_with_echo();
        assert_eq!(graph.click("trigger").unwrap(), 1);
        assert_eq!(graph.click("trigger").unwrap(), 2);
        assert_eq!(graph.version("trigger"), Some(2));
        assert_eq!(graph.input("trigger"), Some(&InputValue::Counter(2)));
    }

    #[test]
    fn test_unknown_and_mismatched_inputs() {
        let (mut graph, _) = graph_with_echo();
        assert!(matches!(graph.click("missing"), Err(HubError::UnknownInput(_))));
        assert!(matches!(graph.click("name"), Err(HubError::InputKindMismatch { .. })));
        assert!(matches!(
            graph.set_input("trigger", InputValue::Text("1".into())),
            Err(HubError::InputKindMismatch { .. })
        ));
    }

    #[test]
    fn test_registration_errors() {
        let (mut graph, runs) = graph_with_echo();
        assert!(matches!(graph.add_input("name", InputValue::Text(String::new())), Err(HubError::Graph(_))));
        assert!(matches!(graph.add_output(Echo { runs }), Err(HubError::Graph(_))));

        let mut empty = ReactiveGraph::new();
        let err = empty.add_output(Echo { runs: Arc::new(AtomicUsize::new(0)) }).unwrap_err();
        assert!(err.to_string().contains("unknown input trigger"));
    }
}
