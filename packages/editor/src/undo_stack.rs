//! # Undo/Redo Stack
//!
//! Bookkeeping for undo history. The manager never touches the document:
//! callers push entries built from a view's journal, and apply whatever
//! `undo`/`redo` hands back through `View::resolve`.
//!
//! ## Design
//!
//! - Each entry holds the deltas that revert a change and the deltas that redo it
//! - Undo moves the newest entry to the redo stack and returns its undo deltas
//! - Redo is symmetric
//! - Any new entry clears the redo stack
//! - Both stacks are capped at the same limit, dropping the oldest entry

use crate::delta::Delta;
use scrivener_document::Selection;
use serde::{Deserialize, Serialize};

/// One undoable change: symmetric delta batches plus the selections around it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoEntry {
    pub undo: Vec<Delta>,
    pub redo: Vec<Delta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_before: Option<Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_after: Option<Selection>,
}

impl UndoEntry {
    pub fn new(undo: Vec<Delta>, redo: Vec<Delta>) -> Self {
        Self {
            undo,
            redo,
            selection_before: None,
            selection_after: None,
        }
    }

    pub fn with_selections(mut self, before: Selection, after: Selection) -> Self {
        self.selection_before = Some(before);
        self.selection_after = Some(after);
        self
    }

    /// Fold a later change into this entry so both undo as one step
    pub fn absorb(&mut self, later: UndoEntry) {
        self.redo.extend(later.redo);
        let mut undo = later.undo;
        undo.append(&mut self.undo);
        self.undo = undo;
        if later.selection_after.is_some() {
            self.selection_after = later.selection_after;
        }
    }
}

/// Deltas to apply for an undo or redo, and where to put the selection after
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub deltas: Vec<Delta>,
    pub selection: Option<Selection>,
}

#[derive(Debug)]
pub struct UndoManager {
    /// Applied changes (most recent last)
    undo_stack: Vec<UndoEntry>,

    /// Undone changes (most recent last)
    redo_stack: Vec<UndoEntry>,

    /// Maximum entries per stack (0 = unlimited)
    max_size: usize,
}

impl UndoManager {
    /// Create an undo manager with the default limit (100)
    pub fn new() -> Self {
        Self::with_max_size(100)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    pub fn push(&mut self, entry: UndoEntry) {
        self.undo_stack.push(entry);
        Self::trim(&mut self.undo_stack, self.max_size);

        // New edits invalidate undone history
        self.redo_stack.clear();
    }

    /// Pop the newest change; `None` when there is nothing to undo
    pub fn undo(&mut self) -> Option<Replay> {
        let entry = self.undo_stack.pop()?;
        let replay = Replay {
            deltas: entry.undo.clone(),
            selection: entry.selection_before,
        };
        self.redo_stack.push(entry);
        Self::trim(&mut self.redo_stack, self.max_size);
        Some(replay)
    }

    /// Re-apply the newest undone change; `None` when there is nothing to redo
    pub fn redo(&mut self) -> Option<Replay> {
        let entry = self.redo_stack.pop()?;
        let replay = Replay {
            deltas: entry.redo.clone(),
            selection: entry.selection_after,
        };
        self.undo_stack.push(entry);
        Self::trim(&mut self.undo_stack, self.max_size);
        Some(replay)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn trim(stack: &mut Vec<UndoEntry>, max_size: usize) {
        if max_size > 0 && stack.len() > max_size {
            let excess = stack.len() - max_size;
            stack.drain(..excess);
        }
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrivener_document::Paragraph;

    fn entry(n: usize) -> UndoEntry {
        UndoEntry::new(
            vec![Delta::update(0, Paragraph::new(format!("before {}", n)))],
            vec![Delta::update(0, Paragraph::new(format!("after {}", n)))],
        )
    }

    #[test]
    fn test_undo_manager_creation() {
        let manager = UndoManager::new();
        assert_eq!(manager.undo_levels(), 0);
        assert_eq!(manager.redo_levels(), 0);
        assert_eq!(manager.max_size(), 100);
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_empty_stacks_return_nothing() {
        let mut manager = UndoManager::new();
        assert_eq!(manager.undo(), None);
        assert_eq!(manager.redo(), None);
    }

    #[test]
    fn test_undo_then_redo() {
        let mut manager = UndoManager::new();
        manager.push(entry(1));

        let undone = manager.undo().unwrap();
        assert_eq!(undone.deltas, entry(1).undo);
        assert_eq!(manager.undo_levels(), 0);
        assert_eq!(manager.redo_levels(), 1);

        let redone = manager.redo().unwrap();
        assert_eq!(redone.deltas, entry(1).redo);
        assert_eq!(manager.undo_levels(), 1);
        assert_eq!(manager.redo_levels(), 0);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut manager = UndoManager::new();
        manager.push(entry(1));
        manager.undo();
        assert!(manager.can_redo());

        manager.push(entry(2));
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_max_size_enforced_on_both_stacks() {
        let mut manager = UndoManager::with_max_size(2);
        for i in 0..5 {
            manager.push(entry(i));
            assert!(manager.undo_levels() <= 2);
        }
        assert_eq!(manager.undo_levels(), 2);

        // Oldest entries were evicted
        assert_eq!(manager.undo().unwrap().deltas, entry(4).undo);
        assert_eq!(manager.undo().unwrap().deltas, entry(3).undo);
        assert_eq!(manager.undo(), None);
        assert_eq!(manager.redo_levels(), 2);
    }

    #[test]
    fn test_absorb_orders_deltas() {
        let mut first = entry(1);
        first.absorb(entry(2));

        assert_eq!(first.redo, [entry(1).redo, entry(2).redo].concat());
        assert_eq!(first.undo, [entry(2).undo, entry(1).undo].concat());
    }

    #[test]
    fn test_replay_carries_selection() {
        let mut manager = UndoManager::new();
        manager.push(entry(1).with_selections(Selection::caret(0, 1), Selection::caret(0, 2)));

        assert_eq!(manager.undo().unwrap().selection, Some(Selection::caret(0, 1)));
        assert_eq!(manager.redo().unwrap().selection, Some(Selection::caret(0, 2)));
    }
}
