//! Debounced snapshot capture and guarded restore.

use crate::{GraphDocument, HistoryStore, Snapshot};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Configuration for snapshot capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Whether automatic capture is enabled.
    pub enabled: bool,

    /// Debounce window for coalescing change signals, in milliseconds.
    pub debounce_ms: u64,

    /// How long a restore keeps ignoring change signals after the write, in
    /// milliseconds. Covers the document's own downstream change
    /// notifications, which arrive after the restore write returns.
    pub settle_ms: u64,

    /// Whether changes that only move the viewport are kept out of history.
    pub skip_viewport_only: bool,

    /// Maximum number of history entries.
    pub max_history_size: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 500,
            settle_ms: 100,
            skip_viewport_only: true,
            max_history_size: crate::store::DEFAULT_MAX_HISTORY_SIZE,
        }
    }
}

/// Transient capture state, owned exclusively by the controller.
struct CaptureState<N, E> {
    /// Committed snapshot history.
    history: HistoryStore<N, E>,

    /// Mirror of the snapshot most recently written into history. Used only
    /// for the significance diff, never exposed.
    last_committed: Option<Snapshot<N, E>>,

    /// Armed debounce timer, if a capture is pending.
    pending: Option<JoinHandle<()>>,

    /// Stamp of the most recently armed debounce timer. Aborting a timer
    /// cannot stop a task that is already past its sleep on a multi-thread
    /// runtime, so every supersession (re-arm, restore, reset) bumps the
    /// stamp and a fired task may only commit while its own stamp is still
    /// current.
    generation: u64,

    /// Armed settle timer, if a restore is still settling.
    settle: Option<JoinHandle<()>>,

    /// True from the start of a restore until the settle timer clears it.
    /// Change signals arriving in this window are ignored entirely.
    is_restoring: bool,
}

/// Drives snapshot capture for one editor session.
///
/// The controller watches change signals from the host (via
/// [`save_snapshot`]), coalesces bursts of them into a single history entry,
/// filters out insignificant deltas, and performs undo/redo restores without
/// the restore write being re-captured as a new edit.
///
/// Construction takes a baseline snapshot of the document, so the very first
/// edit has something to undo back to. All methods are synchronous but the
/// controller arms tokio timers internally, so it must live inside a tokio
/// runtime. Cloning yields a cheap handle to the same session.
///
/// [`save_snapshot`]: CaptureController::save_snapshot
pub struct CaptureController<D: GraphDocument> {
    document: Arc<Mutex<D>>,
    state: Arc<Mutex<CaptureState<D::Node, D::Edge>>>,
    config: CaptureConfig,
}

impl<D: GraphDocument> Clone for CaptureController<D> {
    fn clone(&self) -> Self {
        Self {
            document: Arc::clone(&self.document),
            state: Arc::clone(&self.state),
            config: self.config.clone(),
        }
    }
}

impl<D: GraphDocument> CaptureController<D> {
    /// Create a controller for `document` and commit the baseline snapshot.
    pub fn new(document: Arc<Mutex<D>>, config: CaptureConfig) -> Self {
        let baseline = Self::snapshot_document(&document);
        let mut history = HistoryStore::new(config.max_history_size);
        history.push(baseline.clone());

        debug!(
            debounce_ms = config.debounce_ms,
            max_history_size = config.max_history_size,
            "capture controller mounted"
        );

        Self {
            document,
            state: Arc::new(Mutex::new(CaptureState {
                history,
                last_committed: Some(baseline),
                pending: None,
                generation: 0,
                settle: None,
                is_restoring: false,
            })),
            config,
        }
    }

    /// Signal that the document changed; capture a snapshot after the
    /// debounce window.
    ///
    /// Call this after every document mutation. Signals arriving faster than
    /// the debounce window collapse into one capture reflecting the document
    /// state at the moment the timer fires; intermediate states are never
    /// recorded. Signals arriving while a restore is settling are ignored
    /// entirely.
    pub fn save_snapshot(&self) {
        if !self.config.enabled {
            return;
        }

        let mut state = lock(&self.state);

        if state.is_restoring {
            debug!("change signal ignored while restoring");
            return;
        }

        // Cancel-and-replace: never two timers racing for the same cycle.
        // The stamp catches a fired task the abort can no longer reach.
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
        state.generation = state.generation.wrapping_add(1);

        let document = Arc::clone(&self.document);
        let shared = Arc::clone(&self.state);
        let skip_viewport_only = self.config.skip_viewport_only;
        let delay = Duration::from_millis(self.config.debounce_ms);
        let generation = state.generation;

        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            Self::capture(&document, &shared, skip_viewport_only, generation);
        }));
    }

    /// Step back one history entry and restore it into the document.
    ///
    /// Returns `false` without touching any state when there is nothing to
    /// undo.
    pub fn undo(&self) -> bool {
        let snapshot = match lock(&self.state).history.undo() {
            Some(s) => s.clone(),
            None => {
                debug!("undo requested with no earlier entry");
                return false;
            }
        };

        self.restore(snapshot);
        info!("undo applied");
        true
    }

    /// Step forward one history entry and restore it into the document.
    ///
    /// Returns `false` without touching any state when there is nothing to
    /// redo.
    pub fn redo(&self) -> bool {
        let snapshot = match lock(&self.state).history.redo() {
            Some(s) => s.clone(),
            None => {
                debug!("redo requested with no later entry");
                return false;
            }
        };

        self.restore(snapshot);
        info!("redo applied");
        true
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        lock(&self.state).history.can_undo()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        lock(&self.state).history.can_redo()
    }

    /// The snapshot history currently points at, if any.
    pub fn current_snapshot(&self) -> Option<Snapshot<D::Node, D::Edge>> {
        lock(&self.state).history.current().cloned()
    }

    /// Number of committed history entries.
    pub fn history_len(&self) -> usize {
        lock(&self.state).history.len()
    }

    /// Discard all history and commit a fresh baseline from the document.
    ///
    /// For explicit "new document" actions; history is never cleared
    /// silently.
    pub fn reset(&self) {
        let baseline = Self::snapshot_document(&self.document);

        let mut state = lock(&self.state);
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
        state.generation = state.generation.wrapping_add(1);
        if let Some(settle) = state.settle.take() {
            settle.abort();
        }
        state.is_restoring = false;
        state.history.clear();
        state.history.push(baseline.clone());
        state.last_committed = Some(baseline);

        info!("history reset");
    }

    /// Write `snapshot` into the document behind the restore guard.
    fn restore(&self, snapshot: Snapshot<D::Node, D::Edge>) {
        {
            let mut state = lock(&self.state);
            state.is_restoring = true;
            // A pending capture would only re-record the state this restore
            // is about to write. Bumping the stamp also stops a timer that
            // already fired and is still reading the document from
            // committing a stale snapshot mid-restore.
            if let Some(pending) = state.pending.take() {
                pending.abort();
            }
            state.generation = state.generation.wrapping_add(1);
            // A restore during the previous settle window re-enters
            // Restoring; settle timers never stack.
            if let Some(settle) = state.settle.take() {
                settle.abort();
            }
            state.last_committed = Some(snapshot.clone());
        }

        {
            // All three writes land before the guard is released, so other
            // collaborators never observe a partially restored document.
            let mut doc = lock(&self.document);
            doc.set_nodes(snapshot.nodes);
            doc.set_edges(snapshot.edges);
            doc.set_viewport(snapshot.viewport);
        }

        // The guard stays up past the write itself: the document's own
        // change notifications fire asynchronously and must not be captured
        // as new edits.
        let shared = Arc::clone(&self.state);
        let delay = Duration::from_millis(self.config.settle_ms);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&shared);
            state.is_restoring = false;
            state.settle = None;
        });
        lock(&self.state).settle = Some(handle);
    }

    /// Debounce timer body: snapshot the document and commit if significant.
    fn capture(
        document: &Mutex<D>,
        shared: &Mutex<CaptureState<D::Node, D::Edge>>,
        skip_viewport_only: bool,
        generation: u64,
    ) {
        let snapshot = Self::snapshot_document(document);

        let mut state = lock(shared);

        // Superseded while reading the document: a restore, reset, or newer
        // timer owns this cycle now. Commit nothing and leave the
        // replacement's handle in place.
        if state.is_restoring || generation != state.generation {
            debug!("capture superseded before commit");
            return;
        }

        state.pending = None;

        if !is_significant(state.last_committed.as_ref(), &snapshot, skip_viewport_only) {
            debug!("skipping insignificant change");
            return;
        }

        state.history.push(snapshot.clone());
        state.last_committed = Some(snapshot);
        debug!(entries = state.history.len(), "captured snapshot");
    }

    /// Read the full document state into a snapshot.
    fn snapshot_document(document: &Mutex<D>) -> Snapshot<D::Node, D::Edge> {
        let doc = lock(document);
        Snapshot::new(doc.nodes(), doc.edges(), doc.viewport())
    }
}

/// Whether `new` differs from the last committed snapshot enough to deserve
/// a history entry.
///
/// The first-ever snapshot is always significant; any node or edge delta is
/// significant; a viewport-only delta (or no delta at all) is significant
/// only when `skip_viewport_only` is off, so pan/zoom can drift without
/// polluting undo history.
fn is_significant<N: PartialEq, E: PartialEq>(
    old: Option<&Snapshot<N, E>>,
    new: &Snapshot<N, E>,
    skip_viewport_only: bool,
) -> bool {
    let Some(old) = old else {
        return true;
    };

    if old.nodes != new.nodes || old.edges != new.edges {
        return true;
    }

    !skip_viewport_only
}

/// Lock a mutex, recovering the guard if a panicking thread poisoned it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
