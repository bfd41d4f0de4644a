//! Undo history capture
//!
//! Rapid edits are folded into one undo entry. An open entry closes once
//! input has been idle for the quiet period, or once it has been open for the
//! force-save ceiling even if input never paused. This only decides how
//! history is grouped; the model is always consistent regardless.

use crate::undo_stack::UndoEntry;
use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug)]
struct PendingEntry {
    entry: UndoEntry,
    /// When the first edit of the group arrived
    opened: Instant,
    /// When the latest edit of the group arrived
    touched: Instant,
}

#[derive(Debug)]
pub struct HistoryCapture {
    quiet_period: Duration,
    force_save: Duration,
    pending: Option<PendingEntry>,
}

impl HistoryCapture {
    pub fn new(quiet_period: Duration, force_save: Duration) -> Self {
        Self {
            quiet_period,
            force_save,
            pending: None,
        }
    }

    /// Add an edit made at `now`; returns a closed entry ready for the undo stack
    pub fn record(&mut self, entry: UndoEntry, now: Instant) -> Option<UndoEntry> {
        let closed = self.poll(now);

        match self.pending.as_mut() {
            Some(pending) => {
                pending.entry.absorb(entry);
                pending.touched = now;
            }
            None => {
                self.pending = Some(PendingEntry {
                    entry,
                    opened: now,
                    touched: now,
                });
            }
        }
        closed
    }

    /// Close the open entry if either threshold has passed by `now`
    pub fn poll(&mut self, now: Instant) -> Option<UndoEntry> {
        let pending = self.pending.as_ref()?;
        let idle = now.saturating_duration_since(pending.touched);
        let open = now.saturating_duration_since(pending.opened);

        if idle >= self.quiet_period || open >= self.force_save {
            trace!(?idle, ?open, "Closing history entry");
            return self.flush();
        }
        None
    }

    /// Close the open entry now, whatever the timing
    pub fn flush(&mut self) -> Option<UndoEntry> {
        self.pending.take().map(|pending| pending.entry)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for HistoryCapture {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(2000))
    }
}
