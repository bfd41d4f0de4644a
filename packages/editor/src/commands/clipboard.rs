//! Paste and cut

use super::delete::delete_range;
use super::normalize::{fill_if_empty, harden_line_edges, join_halves, removal_deltas};
use crate::delta::Delta;
use crate::errors::EditorResult;
use crate::surface::Surface;
use crate::view::View;
use scrivener_document::{to_plain_text, Fragment, Paragraph, Selection};
use tracing::debug;

/// Splice imported paragraphs into the selection
///
/// The first pasted paragraph joins the text before the selection, the last
/// one joins the text after it, with the same space-collision rule as
/// deletion. Fragment sections (other than one at its very start) become
/// sections in the document.
pub fn paste<S: Surface>(view: &mut View<S>, fragment: &Fragment) -> EditorResult<()> {
    let selection = view.selection();
    if fragment.is_empty() {
        if !selection.is_collapsed() {
            delete_range(view, selection)?;
        }
        return Ok(());
    }

    let Selection { start, end } = selection.absolute();
    let head = view.paragraphs()[start.paragraph].substr(..start.offset);
    let tail = view.paragraphs()[end.paragraph].substr(end.offset..);
    let pasted = &fragment.paragraphs;
    let count = pasted.len();

    let (first, caret) = if count == 1 {
        let (with_head, _) = join_halves(&head, &pasted[0]);
        join_halves(&with_head, &tail)
    } else {
        join_halves(&head, &pasted[0])
    };

    let finish = |p: Paragraph| fill_if_empty(harden_line_edges(p));
    let mut deltas = vec![Delta::update(start.paragraph, finish(first))];
    deltas.extend(removal_deltas(view, start.paragraph, end.paragraph));

    let mut caret = Selection::caret(start.paragraph, caret);
    if count > 1 {
        for (i, paragraph) in pasted[1..count - 1].iter().enumerate() {
            deltas.push(Delta::insert(start.paragraph + 1 + i, finish(paragraph.clone())));
        }
        let (last, at) = join_halves(&pasted[count - 1], &tail);
        let last_index = start.paragraph + count - 1;
        deltas.push(Delta::insert(last_index, finish(last)));
        caret = Selection::caret(last_index, at);
    }

    for section in &fragment.sections {
        if section.start > 0 && section.start < count {
            deltas.push(Delta::section_insert(start.paragraph + section.start));
        }
    }

    debug!(paragraphs = count, deltas = deltas.len(), "Pasting fragment");
    view.resolve(deltas)?;

    let paragraph_len = view.paragraphs()[caret.start.paragraph].content_len();
    let offset = caret.start.offset.min(paragraph_len);
    view.set_selection(Selection::caret(caret.start.paragraph, offset))
}

/// Serialize the selected range to plain text, then delete it
///
/// Returns an empty string (and changes nothing) for a collapsed selection.
pub fn cut<S: Surface>(view: &mut View<S>) -> EditorResult<String> {
    let selection = view.selection();
    if selection.is_collapsed() {
        return Ok(String::new());
    }

    let Selection { start, end } = selection.absolute();
    let paragraphs = view.paragraphs();
    let parts: Vec<Paragraph> = if start.paragraph == end.paragraph {
        vec![paragraphs[start.paragraph].substr(start.offset..end.offset)]
    } else {
        std::iter::once(paragraphs[start.paragraph].substr(start.offset..))
            .chain(paragraphs[start.paragraph + 1..end.paragraph].iter().cloned())
            .chain(std::iter::once(paragraphs[end.paragraph].substr(..end.offset)))
            .collect()
    };
    let text = to_plain_text(&parts);

    debug!(from = %start, to = %end, chars = text.chars().count(), "Cutting range");
    delete_range(view, selection)?;
    Ok(text)
}
