//! Contract with the live graph document.

use crate::Viewport;

/// Access to the live graph document the engine snapshots and restores.
///
/// The three reads are called at capture time and must be cheap and
/// synchronous. The three writes are applied back-to-back during a restore;
/// collaborators never observe a document with only some of them applied.
///
/// Implementors must not call back into the [`CaptureController`] that owns
/// them from inside these methods. The host signals ordinary edits by calling
/// [`CaptureController::save_snapshot`] after the mutation has been applied.
///
/// [`CaptureController`]: crate::CaptureController
/// [`CaptureController::save_snapshot`]: crate::CaptureController::save_snapshot
pub trait GraphDocument: Send + 'static {
    /// Opaque node payload. The engine only compares nodes structurally.
    type Node: Clone + PartialEq + Send + 'static;

    /// Opaque edge payload. The engine only compares edges structurally.
    type Edge: Clone + PartialEq + Send + 'static;

    /// Current nodes, in document order.
    fn nodes(&self) -> Vec<Self::Node>;

    /// Current edges, in document order.
    fn edges(&self) -> Vec<Self::Edge>;

    /// Current canvas pan/zoom.
    fn viewport(&self) -> Viewport;

    /// Replace the node set.
    fn set_nodes(&mut self, nodes: Vec<Self::Node>);

    /// Replace the edge set.
    fn set_edges(&mut self, edges: Vec<Self::Edge>);

    /// Replace the canvas pan/zoom.
    fn set_viewport(&mut self, viewport: Viewport);
}
