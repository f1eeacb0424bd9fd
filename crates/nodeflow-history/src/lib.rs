//! Snapshot history engine for nodeflow.
//!
//! This crate provides debounced undo/redo over a node-graph document:
//! - Bounded, branch-aware snapshot history with a single cursor
//! - Debounced capture that coalesces bursts of edits into one entry
//! - Viewport-only changes kept out of history
//! - Restores that are never mistaken for new edits
//!
//! The engine treats nodes and edges as opaque payloads; it only ever
//! compares them structurally. Rendering, file formats, and UI chrome live
//! with the host.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//! use nodeflow_history::{CaptureConfig, CaptureController, GraphDocument, Viewport};
//!
//! #[derive(Default)]
//! struct Canvas {
//!     nodes: Vec<String>,
//!     edges: Vec<(usize, usize)>,
//!     viewport: Viewport,
//! }
//!
//! impl GraphDocument for Canvas {
//!     type Node = String;
//!     type Edge = (usize, usize);
//!
//!     fn nodes(&self) -> Vec<String> { self.nodes.clone() }
//!     fn edges(&self) -> Vec<(usize, usize)> { self.edges.clone() }
//!     fn viewport(&self) -> Viewport { self.viewport }
//!     fn set_nodes(&mut self, nodes: Vec<String>) { self.nodes = nodes; }
//!     fn set_edges(&mut self, edges: Vec<(usize, usize)>) { self.edges = edges; }
//!     fn set_viewport(&mut self, viewport: Viewport) { self.viewport = viewport; }
//! }
//!
//! # async fn example() {
//! let document = Arc::new(Mutex::new(Canvas::default()));
//! let history = CaptureController::new(Arc::clone(&document), CaptureConfig::default());
//!
//! // After every document mutation:
//! document.lock().unwrap().nodes.push("oscillator".into());
//! history.save_snapshot();
//!
//! // Wired to keyboard shortcuts:
//! if history.can_undo() {
//!     history.undo();
//! }
//! # }
//! ```

mod capture;
mod document;
mod snapshot;
mod store;

pub use capture::{CaptureConfig, CaptureController};
pub use document::GraphDocument;
pub use snapshot::{Snapshot, Viewport};
pub use store::{HistoryStore, DEFAULT_MAX_HISTORY_SIZE};
