//! Snapshot-based undo/redo history.
//!
//! Each entry is a full, independent copy of a [`Document`]. History is
//! linear: a new commit always discards the redo stack. Both stacks are
//! bounded and drop their oldest entry on overflow.

use std::collections::VecDeque;

use crate::document::Document;
use crate::error::{EditorError, EditorResult};

/// Default number of undo levels kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Undo/redo stacks of document snapshots.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    /// Snapshots to return to on undo (most recent last).
    undo_stack: VecDeque<Document>,

    /// Snapshots to return to on redo (most recent last).
    redo_stack: VecDeque<Document>,

    /// Maximum entries per stack, at least 1.
    limit: usize,
}

impl HistoryManager {
    /// Creates a history with the default limit.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Creates a history keeping at most `limit` entries per stack.
    ///
    /// A limit of 0 is raised to 1; history is always bounded.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Records a snapshot to return to and clears the redo stack.
    pub fn commit(&mut self, snapshot: Document) {
        push_bounded(&mut self.undo_stack, snapshot, self.limit);
        self.redo_stack.clear();
    }

    /// Steps back: returns the most recent snapshot and keeps `current` for
    /// redo.
    pub fn undo(&mut self, current: Document) -> EditorResult<Document> {
        let previous = self.undo_stack.pop_back().ok_or(EditorError::NothingToUndo)?;
        push_bounded(&mut self.redo_stack, current, self.limit);
        Ok(previous)
    }

    /// Steps forward: returns the most recently undone state and keeps
    /// `current` for undo.
    pub fn redo(&mut self, current: Document) -> EditorResult<Document> {
        let next = self.redo_stack.pop_back().ok_or(EditorError::NothingToRedo)?;
        push_bounded(&mut self.undo_stack, current, self.limit);
        Ok(next)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Maximum entries kept per stack.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded(stack: &mut VecDeque<Document>, snapshot: Document, limit: usize) {
    stack.push_back(snapshot);
    while stack.len() > limit {
        stack.pop_front();
    }
}
