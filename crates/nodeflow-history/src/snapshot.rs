//! Snapshot data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pan/zoom state of the graph canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal pan offset.
    pub x: f64,
    /// Vertical pan offset.
    pub y: f64,
    /// Zoom factor (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// A full capture of the graph document at one instant.
///
/// Node and edge payloads are opaque to the engine; it only ever compares
/// them structurally. Once a snapshot is stored in history it is never
/// mutated, only replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<N, E> {
    /// All nodes in the document.
    pub nodes: Vec<N>,

    /// All edges in the document.
    pub edges: Vec<E>,

    /// Canvas pan/zoom at capture time.
    pub viewport: Viewport,

    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
}

impl<N, E> Snapshot<N, E> {
    /// Create a new snapshot, timestamped now.
    pub fn new(nodes: Vec<N>, edges: Vec<E>, viewport: Viewport) -> Self {
        Self {
            nodes,
            edges,
            viewport,
            timestamp: Utc::now(),
        }
    }
}
