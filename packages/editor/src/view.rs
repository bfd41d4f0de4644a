//! # View: the Resolution Engine
//!
//! The view owns the logical document (paragraphs, sections, selection) and
//! mediates every change to it.
//!
//! ## Resolution
//!
//! ```text
//! resolve(deltas)
//!   ├─ validate the whole batch against a simulated shape   (all or nothing)
//!   ├─ apply to paragraphs/sections now                      (reads see it)
//!   ├─ record inverses in the journal                        (for undo)
//!   └─ queue deltas, mark a flush as scheduled               (coalesced)
//!
//! flush()
//!   ├─ replay queued deltas onto the surface, in order
//!   ├─ check surface element count == paragraph count
//!   ├─ place the caret, notify if the selection moved
//!   └─ clear queue and schedule flag
//! ```
//!
//! A flush takes the whole queue before touching the surface, so deltas
//! resolved afterwards land in the next flush and at most one flush is ever
//! in flight.

use crate::delta::{Delta, Shape};
use crate::errors::{EditorError, EditorResult};
use crate::notifications::{ErrorChannel, Notification};
use crate::surface::Surface;
use scrivener_document::{BlockKind, Document, Paragraph, Position, Section, Selection};
use std::mem;
use tracing::{debug, instrument, warn};

/// Deltas applied since the journal was last taken, with their inverses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    /// Applied deltas in application order
    pub redo: Vec<Delta>,
    inverse_groups: Vec<Vec<Delta>>,
}

impl Journal {
    pub fn is_empty(&self) -> bool {
        self.redo.is_empty()
    }

    /// Deltas that revert everything in the journal, in application order
    pub fn undo(&self) -> Vec<Delta> {
        self.inverse_groups.iter().rev().flatten().cloned().collect()
    }

    fn record(&mut self, delta: Delta, inverse: Vec<Delta>) {
        self.redo.push(delta);
        self.inverse_groups.push(inverse);
    }
}

pub struct View<S: Surface> {
    paragraphs: Vec<Paragraph>,
    sections: Vec<Section>,
    selection: Selection,
    surface: S,
    pending: Vec<Delta>,
    flush_scheduled: bool,
    /// Selection last placed on the surface
    flushed_selection: Selection,
    journal: Journal,
    notifications: Vec<Notification>,
    errors: ErrorChannel,
    version: u64,
}

impl<S: Surface> View<S> {
    /// Create a view over a document the surface already displays
    pub fn new(document: Document, surface: S) -> EditorResult<Self> {
        let Document {
            paragraphs,
            sections,
        } = document.validated()?;

        if surface.element_count() != paragraphs.len() {
            return Err(EditorError::sync(format!(
                "surface holds {} elements, document has {} paragraphs",
                surface.element_count(),
                paragraphs.len()
            )));
        }

        Ok(Self {
            paragraphs,
            sections,
            selection: Selection::default(),
            surface,
            pending: Vec::new(),
            flush_scheduled: false,
            flushed_selection: Selection::default(),
            journal: Journal::default(),
            notifications: Vec::new(),
            errors: ErrorChannel::default(),
            version: 0,
        })
    }

    pub fn with_error_channel(mut self, errors: ErrorChannel) -> Self {
        self.errors = errors;
        self
    }

    pub fn set_error_channel(&mut self, errors: ErrorChannel) {
        self.errors = errors;
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Copy of the current selection
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Number of flushes that carried model changes
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Snapshot of the logical document
    pub fn document(&self) -> Document {
        Document {
            paragraphs: self.paragraphs.clone(),
            sections: self.sections.clone(),
        }
    }

    pub fn is_section_start(&self, index: usize) -> bool {
        self.sections.iter().any(|s| s.start == index)
    }

    pub fn is_flush_scheduled(&self) -> bool {
        self.flush_scheduled
    }

    pub fn pending_deltas(&self) -> &[Delta] {
        &self.pending
    }

    /// Replace the selection; both endpoints must lie inside the document
    ///
    /// A trailing soft break terminates its paragraph, so no position may
    /// sit after it.
    pub fn set_selection(&mut self, selection: Selection) -> EditorResult<()> {
        for position in [selection.start, selection.end] {
            self.check_position(position)?;
        }
        if selection != self.selection {
            self.selection = selection;
            self.flush_scheduled = true;
        }
        Ok(())
    }

    /// Apply a batch of deltas to the logical model and queue it for the surface
    ///
    /// The batch is validated as a whole first; if any delta is invalid
    /// nothing is applied and nothing is scheduled.
    #[instrument(skip(self, deltas), fields(paragraphs = self.paragraphs.len()))]
    pub fn resolve(&mut self, deltas: impl IntoIterator<Item = Delta>) -> EditorResult<()> {
        let deltas: Vec<Delta> = deltas.into_iter().collect();
        if deltas.is_empty() {
            return Ok(());
        }

        let mut shape = Shape::new(self.paragraphs.len(), &self.sections);
        for delta in &deltas {
            if let Err(err) = shape.apply(delta) {
                warn!(delta = delta.name(), index = delta.index(), error = %err, "Rejected delta batch");
                self.notifications.push(Notification::error(&err));
                return Err(err);
            }
        }

        for delta in &deltas {
            let inverse = self.apply_delta(delta)?;
            self.journal.record(delta.clone(), inverse);
        }
        debug_assert_eq!(self.sections, shape.sections);
        self.clamp_selection();

        debug!(count = deltas.len(), "Resolved deltas");
        self.pending.extend(deltas);
        self.flush_scheduled = true;
        Ok(())
    }

    /// Replay queued deltas onto the surface and restore the selection
    ///
    /// Does nothing when no flush is scheduled. Failures go to the error
    /// channel; the logical model is never rolled back.
    #[instrument(skip(self), fields(pending = self.pending.len()))]
    pub fn flush(&mut self) -> EditorResult<()> {
        if !self.flush_scheduled {
            return Ok(());
        }
        self.flush_scheduled = false;
        let deltas = mem::take(&mut self.pending);

        for delta in &deltas {
            if let Err(err) = self.surface.apply(delta) {
                return self.report(err);
            }
        }

        let elements = self.surface.element_count();
        if elements != self.paragraphs.len() {
            let err = EditorError::sync(format!(
                "surface holds {} elements, model has {} paragraphs",
                elements,
                self.paragraphs.len()
            ));
            return self.report(err);
        }

        if !deltas.is_empty() {
            self.version += 1;
            self.notifications.push(Notification::Change {
                version: self.version,
                deltas: deltas.len(),
            });
        }

        self.surface.place_caret(&self.selection);
        if self.selection != self.flushed_selection {
            self.flushed_selection = self.selection;
            self.notifications.push(Notification::SelectionChange {
                selection: self.selection,
            });
        }

        debug!(deltas = deltas.len(), version = self.version, "Flushed");
        Ok(())
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    /// Take the deltas (and inverses) applied since the last call
    pub fn take_journal(&mut self) -> Journal {
        mem::take(&mut self.journal)
    }

    /// Read every block back from the surface through the tag boundary
    pub fn read_back(&self) -> EditorResult<Vec<Paragraph>> {
        (0..self.surface.element_count())
            .map(|index| {
                let block = self.surface.block(index).ok_or_else(|| {
                    EditorError::sync(format!("surface has no element at {}", index))
                })?;
                let kind = BlockKind::from_tag(&block.tag)?;
                Ok(Paragraph::from_parts(block.text, block.markups, kind))
            })
            .collect()
    }

    fn report(&mut self, err: EditorError) -> EditorResult<()> {
        warn!(error = %err, "Abandoning flush");
        self.notifications.push(Notification::error(&err));
        self.errors.report(err)
    }

    fn check_position(&self, position: Position) -> EditorResult<()> {
        match self.paragraphs.get(position.paragraph) {
            Some(paragraph) if position.offset <= paragraph.content_len() => Ok(()),
            Some(paragraph) => Err(EditorError::validation(format!(
                "offset {} is past the end of paragraph {} ({} chars before its terminator)",
                position.offset,
                position.paragraph,
                paragraph.content_len()
            ))),
            None => Err(EditorError::validation(format!(
                "paragraph {} does not exist ({} paragraphs)",
                position.paragraph,
                self.paragraphs.len()
            ))),
        }
    }

    /// Keep the selection inside the document (and before any terminator)
    /// after structural edits
    fn clamp_selection(&mut self) {
        let clamp = |position: Position, paragraphs: &[Paragraph]| {
            let last = paragraphs.len() - 1;
            let paragraph = position.paragraph.min(last);
            Position::new(paragraph, position.offset.min(paragraphs[paragraph].content_len()))
        };
        let clamped = Selection {
            start: clamp(self.selection.start, &self.paragraphs),
            end: clamp(self.selection.end, &self.paragraphs),
        };
        if clamped != self.selection {
            self.selection = clamped;
        }
    }

    /// Apply one pre-validated delta and return the deltas that revert it
    fn apply_delta(&mut self, delta: &Delta) -> EditorResult<Vec<Delta>> {
        let before = Shape::new(self.paragraphs.len(), &self.sections);
        let mut after = before.clone();
        after.apply(delta)?;

        let mut inverse = match delta {
            Delta::ParagraphInsert { index, paragraph } => {
                self.paragraphs.insert(*index, paragraph.clone());
                vec![Delta::delete(*index)]
            }
            Delta::ParagraphUpdate { index, paragraph } => {
                let old = mem::replace(&mut self.paragraphs[*index], paragraph.clone());
                vec![Delta::update(*index, old)]
            }
            Delta::ParagraphDelete { index } => {
                let old = self.paragraphs.remove(*index);
                vec![Delta::insert(*index, old)]
            }
            Delta::SectionInsert { index } => vec![Delta::section_delete(*index)],
            Delta::SectionDelete { index } => vec![Delta::section_insert(*index)],
        };
        self.sections = after.sections.clone();

        // Pruning can drop sections the plain inverse would not bring back
        if matches!(
            delta,
            Delta::ParagraphInsert { .. } | Delta::ParagraphDelete { .. }
        ) {
            let mut reverted = after;
            reverted.apply(&inverse[0])?;
            for section in &reverted.sections {
                if !before.sections.contains(section) {
                    inverse.push(Delta::section_delete(section.start));
                }
            }
            for section in &before.sections {
                if !reverted.sections.contains(section) {
                    inverse.push(Delta::section_insert(section.start));
                }
            }
        }

        Ok(inverse)
    }
}
