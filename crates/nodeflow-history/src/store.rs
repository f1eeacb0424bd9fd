//! Bounded, branch-aware snapshot history.

use crate::Snapshot;
use tracing::debug;

/// Default maximum number of history entries.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 50;

/// An ordered sequence of snapshots plus a cursor marking "what the document
/// currently shows".
///
/// The history is strictly linear: committing a new entry while the cursor
/// sits behind the tail discards the redo tail permanently (standard editor
/// undo semantics, not a tree of alternate futures). When the store is full,
/// entries are dropped from the front so long sessions lose ancient history,
/// never recent undo capability.
///
/// Pure data structure: no timers, no side effects, and every operation is
/// total. Boundary conditions ("nothing to undo") are signalled with `None`
/// and leave the store untouched.
#[derive(Debug, Clone)]
pub struct HistoryStore<N, E> {
    /// Committed snapshots, oldest first.
    entries: Vec<Snapshot<N, E>>,

    /// Index of the current entry; `None` while the store is empty.
    cursor: Option<usize>,

    /// Maximum number of retained entries.
    max_size: usize,
}

impl<N, E> HistoryStore<N, E> {
    /// Create an empty store retaining at most `max_size` entries.
    ///
    /// A `max_size` of zero is treated as one: the store always keeps at
    /// least the entry it just committed.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_size: max_size.max(1),
        }
    }

    /// Commit a snapshot as the new current entry.
    ///
    /// Any redo tail beyond the cursor is discarded first, then the oldest
    /// entries are dropped until the store fits `max_size`. Unconditionally
    /// destroys redo history; callers must not push speculatively.
    pub fn push(&mut self, snapshot: Snapshot<N, E>) {
        match self.cursor {
            Some(i) => self.entries.truncate(i + 1),
            None => self.entries.clear(),
        }

        self.entries.push(snapshot);

        if self.entries.len() > self.max_size {
            let overflow = self.entries.len() - self.max_size;
            self.entries.drain(..overflow);
            debug!(dropped = overflow, "trimmed oldest history entries");
        }

        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step the cursor back one entry and return the new current snapshot.
    ///
    /// Returns `None` without touching state when the history is empty or
    /// the cursor is already at the oldest entry. A freshly mounted history
    /// holds a single baseline, so undo is a no-op until a second entry
    /// exists.
    pub fn undo(&mut self) -> Option<&Snapshot<N, E>> {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                self.entries.get(i - 1)
            }
            _ => None,
        }
    }

    /// Step the cursor forward one entry and return the new current snapshot.
    ///
    /// Returns `None` without touching state when there is no redo tail.
    pub fn redo(&mut self) -> Option<&Snapshot<N, E>> {
        let i = self.cursor?;
        if i + 1 < self.entries.len() {
            self.cursor = Some(i + 1);
            self.entries.get(i + 1)
        } else {
            None
        }
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(i) if i > 0)
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        match self.cursor {
            Some(i) => i + 1 < self.entries.len(),
            None => false,
        }
    }

    /// The snapshot the cursor currently points at, if any.
    pub fn current(&self) -> Option<&Snapshot<N, E>> {
        self.entries.get(self.cursor?)
    }

    /// Number of committed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries and reset the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

impl<N, E> Default for HistoryStore<N, E> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_SIZE)
    }
}
