//! Undo history keyed by stable element identifiers.

use crate::draw::ElementId;
use std::collections::HashMap;

/// One undo-stack slot.
///
/// `removed` entries are tombstones: the element was permanently erased and
/// the slot stays in place only so stack positions remain stable.
#[derive(Debug)]
struct HistoryEntry {
    id: ElementId,
    removed: bool,
}

/// Undo stack with permanent-erasure semantics.
///
/// Every finished element is recorded once, at creation. Undo pops the most
/// recent entry that has not been tombstoned. [`DrawingHistory::remove`]
/// tombstones an entry in place, which is how eraser deletions become
/// permanent: an erased element can never come back through undo, no matter
/// how record/erase/undo calls interleave.
#[derive(Debug, Default)]
pub struct DrawingHistory {
    stack: Vec<HistoryEntry>,
    // id -> position in `stack`, for O(1) tombstoning. Entries are evicted
    // when tombstoned or popped, so the map only ever holds live entries.
    index: HashMap<ElementId, usize>,
}

impl DrawingHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly created element. Call exactly once per element.
    pub fn record(&mut self, id: ElementId) {
        if self.index.contains_key(&id) {
            log::warn!("element {id} recorded twice; ignoring duplicate");
            return;
        }
        self.index.insert(id, self.stack.len());
        self.stack.push(HistoryEntry { id, removed: false });
    }

    /// Pops the most recent live entry and returns its element id.
    ///
    /// Tombstoned entries encountered on the way are discarded without being
    /// returned, so one call may shrink the stack by more than one slot.
    /// Returns `None` once the stack is exhausted.
    pub fn undo_last(&mut self) -> Option<ElementId> {
        while let Some(entry) = self.stack.pop() {
            if entry.removed {
                continue;
            }
            self.index.remove(&entry.id);
            return Some(entry.id);
        }
        None
    }

    /// Permanently tombstones the entry for `id`.
    ///
    /// Returns true if a live entry was found. After this call the id can
    /// never be returned by [`DrawingHistory::undo_last`].
    pub fn remove(&mut self, id: ElementId) -> bool {
        match self.index.remove(&id) {
            Some(position) => {
                self.stack[position].removed = true;
                true
            }
            None => false,
        }
    }

    /// Drops every entry, live and tombstoned.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.index.clear();
    }

    /// Number of live (non-tombstoned) entries.
    pub fn live_len(&self) -> usize {
        self.index.len()
    }

    /// Returns true when no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
