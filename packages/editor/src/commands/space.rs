//! Space insertion

use super::delete::delete_range;
use crate::delta::Delta;
use crate::errors::{EditorError, EditorResult};
use crate::surface::Surface;
use crate::view::View;
use scrivener_document::whitespace::{is_space, NBSP, SOFT_BREAK, SPACE};
use scrivener_document::{MarkupKind, Selection};
use tracing::debug;

/// Which space to insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// Pick a plain or non-breaking space from the caret's surroundings
    Auto,

    /// Insert exactly this space-class character
    Char(char),
}

/// Insert a space at the caret, replacing any selected range
///
/// With [`Space::Auto`], a caret already followed by a space just steps over
/// it, a caret already preceded by one inserts nothing, and line edges get a
/// non-breaking space. A link ending at the caret does not grow over the new
/// space; other markups do.
pub fn insert_space<S: Surface>(view: &mut View<S>, space: Space) -> EditorResult<()> {
    if let Space::Char(ch) = space {
        if !is_space(ch) {
            return Err(EditorError::validation(format!(
                "{:?} is not a space character",
                ch
            )));
        }
    }

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

    let ch = match space {
        Space::Char(ch) => ch,
        Space::Auto => {
            if next.is_some_and(is_space) {
                debug!(at = %caret, "Stepping over existing space");
                return view.set_selection(Selection::caret(caret.paragraph, caret.offset + 1));
            }
            if previous.is_some_and(is_space) {
                debug!(at = %caret, "Space already precedes caret");
                return Ok(());
            }
            let at_line_edge = previous.is_none()
                || previous == Some(SOFT_BREAK)
                || next.is_none()
                || next == Some(SOFT_BREAK);
            if at_line_edge {
                NBSP
            } else {
                SPACE
            }
        }
    };

    let link_ends_here = paragraph
        .markups_ending_at(MarkupKind::Link, caret.offset)
        .next()
        .is_some();
    let mut updated = paragraph.insert_text(caret.offset, &ch.to_string());
    if link_ends_here {
        updated = updated.remove_markup(MarkupKind::Link, caret.offset..caret.offset + 1);
    }

    view.resolve([Delta::update(caret.paragraph, updated)])?;
    view.set_selection(Selection::caret(caret.paragraph, caret.offset + 1))
}
