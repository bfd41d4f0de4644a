//! Backspace, forward delete and range deletion

use super::normalize::{fill_if_empty, harden_line_edges, join_halves, removal_deltas};
use crate::delta::Delta;
use crate::errors::EditorResult;
use crate::surface::Surface;
use crate::view::View;
use scrivener_document::{Position, Selection};
use tracing::debug;

/// Delete one unit backwards, or the selected range
pub fn backspace<S: Surface>(view: &mut View<S>) -> EditorResult<()> {
    let selection = view.selection();
    if !selection.is_collapsed() {
        return delete_range(view, selection);
    }

    let caret = selection.start;
    let from = if caret.offset > 0 {
        Position::new(caret.paragraph, caret.offset - 1)
    } else if caret.paragraph > 0 {
        // Land before the previous paragraph's terminator, if it has one
        let previous = caret.paragraph - 1;
        Position::new(previous, view.paragraphs()[previous].content_len())
    } else {
        debug!("Backspace at document start");
        return Ok(());
    };

    delete_range(view, Selection::new(from, caret))
}

/// Delete one unit forwards, or the selected range
pub fn forward_delete<S: Surface>(view: &mut View<S>) -> EditorResult<()> {
    let selection = view.selection();
    if !selection.is_collapsed() {
        return delete_range(view, selection);
    }

    let caret = selection.start;
    let paragraph = &view.paragraphs()[caret.paragraph];
    let to = if caret.offset < paragraph.content_len() {
        Position::new(caret.paragraph, caret.offset + 1)
    } else if caret.paragraph + 1 < view.paragraphs().len() {
        Position::new(caret.paragraph + 1, 0)
    } else {
        debug!("Forward delete at document end");
        return Ok(());
    };

    delete_range(view, Selection::new(caret, to))
}

/// Remove the text between the selection's endpoints, merging the boundary
/// paragraphs into the first one
pub fn delete_range<S: Surface>(view: &mut View<S>, selection: Selection) -> EditorResult<()> {
    let Selection { start, end } = selection.absolute();
    let (deltas, caret) = range_deletion(view, start, end);

    debug!(from = %start, to = %end, deltas = deltas.len(), "Deleting range");
    view.resolve(deltas)?;
    view.set_selection(Selection::caret(start.paragraph, caret))
}

/// Deltas for deleting `start..end` and the caret offset in the survivor
pub(crate) fn range_deletion<S: Surface>(
    view: &View<S>,
    start: Position,
    end: Position,
) -> (Vec<Delta>, usize) {
    let head = view.paragraphs()[start.paragraph].substr(..start.offset);
    let tail = view.paragraphs()[end.paragraph].substr(end.offset..);

    let (joined, caret) = join_halves(&head, &tail);
    let merged = fill_if_empty(harden_line_edges(joined));
    let caret = caret.min(merged.content_len());

    let mut deltas = vec![Delta::update(start.paragraph, merged)];
    deltas.extend(removal_deltas(view, start.paragraph, end.paragraph));
    (deltas, caret)
}
