//! Editor facade
//!
//! Wires a [`View`], an [`UndoManager`] and a [`HistoryCapture`] together:
//! commands run against the view, their journal becomes an undo entry, and
//! rapid entries are grouped before they reach the undo stack.

use crate::commands::{Command, CommandOutcome};
use crate::config::EditorConfig;
use crate::errors::EditorResult;
use crate::history::HistoryCapture;
use crate::notifications::ErrorChannel;
use crate::surface::Surface;
use crate::undo_stack::{Replay, UndoEntry, UndoManager};
use crate::view::View;
use scrivener_document::Document;
use std::time::Instant;
use tracing::{debug, instrument};

pub struct Editor<S: Surface> {
    view: View<S>,
    undo: UndoManager,
    history: HistoryCapture,
}

impl<S: Surface> Editor<S> {
    pub fn new(document: Document, surface: S, config: &EditorConfig) -> EditorResult<Self> {
        let view =
            View::new(document, surface)?.with_error_channel(ErrorChannel::new(config.error_policy));
        Ok(Self {
            view,
            undo: UndoManager::with_max_size(config.undo_limit),
            history: HistoryCapture::new(config.quiet_period(), config.force_save()),
        })
    }

    pub fn view(&self) -> &View<S> {
        &self.view
    }

    /// Direct access to the view; changes resolved through it are not recorded in history
    pub fn view_mut(&mut self) -> &mut View<S> {
        &mut self.view
    }

    pub fn undo_manager(&self) -> &UndoManager {
        &self.undo
    }

    pub fn document(&self) -> Document {
        self.view.document()
    }

    pub fn execute(&mut self, command: &Command) -> EditorResult<CommandOutcome> {
        self.execute_at(command, Instant::now())
    }

    /// Run a command as if issued at `now`
    ///
    /// Whatever the command managed to resolve is recorded, even when it
    /// fails partway.
    #[instrument(skip(self, command, now), fields(command = command.name()))]
    pub fn execute_at(&mut self, command: &Command, now: Instant) -> EditorResult<CommandOutcome> {
        let before = self.view.selection();
        self.view.take_journal();

        let outcome = command.execute(&mut self.view);

        let journal = self.view.take_journal();
        if !journal.is_empty() {
            let entry = UndoEntry::new(journal.undo(), journal.redo)
                .with_selections(before, self.view.selection());
            if let Some(closed) = self.history.record(entry, now) {
                self.undo.push(closed);
            }
        }
        outcome
    }

    /// Host tick: close stale history groups, then flush the view
    pub fn tick(&mut self, now: Instant) -> EditorResult<()> {
        if let Some(closed) = self.history.poll(now) {
            self.undo.push(closed);
        }
        self.view.flush()
    }

    /// Push the open history group onto the undo stack
    pub fn commit_history(&mut self) {
        if let Some(closed) = self.history.flush() {
            self.undo.push(closed);
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.has_pending() || self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.history.has_pending() && self.undo.can_redo()
    }

    /// Revert the latest change; `Ok(false)` when there is nothing to undo
    pub fn undo(&mut self) -> EditorResult<bool> {
        self.commit_history();
        match self.undo.undo() {
            Some(replay) => {
                debug!(deltas = replay.deltas.len(), "Undoing");
                self.replay(replay)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-apply the latest undone change; `Ok(false)` when there is nothing to redo
    pub fn redo(&mut self) -> EditorResult<bool> {
        self.commit_history();
        match self.undo.redo() {
            Some(replay) => {
                debug!(deltas = replay.deltas.len(), "Redoing");
                self.replay(replay)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn replay(&mut self, replay: Replay) -> EditorResult<()> {
        self.view.resolve(replay.deltas)?;
        self.view.take_journal();
        if let Some(selection) = replay.selection {
            self.view.set_selection(selection)?;
        }
        Ok(())
    }
}
