//! posit-hub-reactive — Per-session reactive state for the Posit Hub UI.
//!
//! Inputs are versioned nodes; outputs are renderers that list the inputs
//! they depend on. A flush recomputes exactly the outputs whose dependency
//! versions moved since they last ran:
//!
//! ```text
//! InputUpdate → ReactiveGraph::set_input / click → flush → SessionEvent::Output
//! ```

pub mod controls;
pub mod value;
pub mod graph;
pub mod section;
pub mod renderers;
pub mod session;

pub use graph::{InputReader, OutputUpdate, ReactiveGraph, Renderer};
pub use section::{Panel, Section};
pub use session::{InputUpdate, Session, SessionEvent, SessionSnapshot};
pub use value::{FileDescriptor, InputKind, InputValue};
