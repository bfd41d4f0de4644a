//! Soft breaks, paragraph breaks and section breaks

use super::delete::delete_range;
use super::normalize::{harden_line_edges, removal_deltas};
use crate::delta::Delta;
use crate::errors::EditorResult;
use crate::surface::Surface;
use crate::view::View;
use scrivener_document::whitespace::SOFT_BREAK;
use scrivener_document::{Paragraph, Selection};
use tracing::debug;

/// Insert a soft break at the caret
///
/// A soft break that would sit next to another one, or at the very end of
/// the paragraph, looks exactly like a paragraph break, so it becomes one.
/// A trailing `\n` is the paragraph's invisible terminator, so a soft break
/// typed at the end would render as nothing more than a new paragraph.
pub fn newline<S: Surface>(view: &mut View<S>) -> EditorResult<()> {
    let selection = view.selection();
    if !selection.is_collapsed() {
        delete_range(view, selection)?;
    }

    let caret = view.selection().start;
    let paragraph = &view.paragraphs()[caret.paragraph];
    let previous = caret
        .offset
        .checked_sub(1)
        .and_then(|i| paragraph.char_at(i));
    let next = paragraph.char_at(caret.offset);

    if previous == Some(SOFT_BREAK) || next == Some(SOFT_BREAK) || next.is_none() {
        debug!(at = %caret, "Promoting soft break to paragraph break");
        return new_paragraph(view);
    }

    let updated = harden_line_edges(paragraph.insert_text(caret.offset, &SOFT_BREAK.to_string()));
    view.resolve([Delta::update(caret.paragraph, updated)])?;
    view.set_selection(Selection::caret(caret.paragraph, caret.offset + 1))
}

/// Split the paragraph at the caret, replacing any selected range
pub fn new_paragraph<S: Surface>(view: &mut View<S>) -> EditorResult<()> {
    let Selection { start, end } = view.selection().absolute();

    let mut head = view.paragraphs()[start.paragraph].substr(..start.offset);
    if !head.ends_with_soft_break() {
        head = head.append(&Paragraph::soft_break(head.kind()));
    }

    let tail = view.paragraphs()[end.paragraph].substr(end.offset..);
    let tail = if tail.is_empty() {
        Paragraph::soft_break(head.kind())
    } else {
        tail
    };

    let mut deltas = vec![Delta::update(start.paragraph, harden_line_edges(head))];
    deltas.extend(removal_deltas(view, start.paragraph, end.paragraph));
    deltas.push(Delta::insert(start.paragraph + 1, harden_line_edges(tail)));

    debug!(at = %start, deltas = deltas.len(), "Splitting paragraph");
    view.resolve(deltas)?;
    view.set_selection(Selection::caret(start.paragraph + 1, 0))
}

/// Split the paragraph and start a new section at the second half
pub fn new_section<S: Surface>(view: &mut View<S>) -> EditorResult<()> {
    new_paragraph(view)?;
    let index = view.selection().start.paragraph;
    view.resolve([Delta::section_insert(index)])
}
