//! Whitespace rules shared by the editing commands
//!
//! - Two spaces never meet across a join; if one of them is exotic it wins.
//! - Two soft breaks never meet either.
//! - A plain space at a line edge (paragraph start/end, next to a soft
//!   break) would collapse on the surface, so it becomes a non-breaking space.
//! - A paragraph is never empty; the empty paragraph is a lone soft break.

use crate::delta::Delta;
use crate::surface::Surface;
use crate::view::View;
use scrivener_document::whitespace::{is_exotic_space, is_space, NBSP, SOFT_BREAK, SPACE};
use scrivener_document::Paragraph;

/// Join two halves, dropping one side of a space or soft-break collision.
///
/// Returns the joined paragraph and the offset at which `right` begins.
pub(crate) fn join_halves(left: &Paragraph, right: &Paragraph) -> (Paragraph, usize) {
    let mut left = left.clone();
    let mut right = right.clone();

    if let (Some(l), Some(r)) = (left.last_char(), right.char_at(0)) {
        if is_space(l) && is_space(r) {
            if !is_exotic_space(l) && is_exotic_space(r) {
                left = left.substr(..left.len() - 1);
            } else {
                right = right.substr(1..);
            }
        } else if l == SOFT_BREAK && r == SOFT_BREAK {
            right = right.substr(1..);
        }
    }

    let at = left.len();
    (left.append(&right), at)
}

/// Turn plain spaces at line edges into non-breaking spaces
pub(crate) fn harden_line_edges(paragraph: Paragraph) -> Paragraph {
    let chars: Vec<char> = paragraph.text().chars().collect();
    let last = chars.len().saturating_sub(1);
    let edges: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|&(i, &ch)| {
            ch == SPACE
                && (i == 0
                    || i == last
                    || chars[i - 1] == SOFT_BREAK
                    || chars[i + 1] == SOFT_BREAK)
        })
        .map(|(i, _)| i)
        .collect();

    let nbsp = NBSP.to_string();
    edges
        .into_iter()
        .fold(paragraph, |p, i| p.replace_range(i..i + 1, &nbsp))
}

/// Substitute the canonical empty paragraph for an empty one
pub(crate) fn fill_if_empty(paragraph: Paragraph) -> Paragraph {
    if paragraph.is_empty() {
        Paragraph::soft_break(paragraph.kind())
    } else {
        paragraph
    }
}

/// Deltas removing paragraphs `first + 1 ..= last`, each preceded by the
/// removal of its section boundary if it has one.
///
/// Every delete targets `first + 1`, the slot the next doomed paragraph
/// slides into.
pub(crate) fn removal_deltas<S: Surface>(view: &View<S>, first: usize, last: usize) -> Vec<Delta> {
    let mut deltas = Vec::new();
    for index in first + 1..=last {
        if view.is_section_start(index) {
            deltas.push(Delta::section_delete(first + 1));
        }
        deltas.push(Delta::delete(first + 1));
    }
    deltas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(left: &str, right: &str) -> (String, usize) {
        let (p, at) = join_halves(&Paragraph::new(left), &Paragraph::new(right));
        (p.text().to_string(), at)
    }

    #[test]
    fn test_join_without_collision() {
        assert_eq!(joined("Stuff", "things"), ("Stuffthings".to_string(), 5));
    }

    #[test]
    fn test_join_drops_right_plain_space() {
        assert_eq!(joined("One ", " Two"), ("One Two".to_string(), 4));
    }

    #[test]
    fn test_join_prefers_exotic_space() {
        assert_eq!(
            joined("One ", "\u{00A0}Two"),
            ("One\u{00A0}Two".to_string(), 3)
        );
        assert_eq!(
            joined("One\u{00A0}", " Two"),
            ("One\u{00A0}Two".to_string(), 4)
        );
    }

    #[test]
    fn test_join_collapses_double_soft_break() {
        assert_eq!(joined("a\n", "\nb"), ("a\nb".to_string(), 2));
    }

    #[test]
    fn test_harden_line_edges() {
        let p = harden_line_edges(Paragraph::new(" a b \nc d "));
        assert_eq!(p.text(), "\u{00A0}a b\u{00A0}\nc d\u{00A0}");

        let p = harden_line_edges(Paragraph::new("x \n"));
        assert_eq!(p.text(), "x\u{00A0}\n");
    }

    #[test]
    fn test_harden_keeps_markups() {
        let p = Paragraph::new("a ").with_markup(scrivener_document::Markup::new(
            scrivener_document::MarkupKind::Bold,
            0,
            2,
        ));
        let hardened = harden_line_edges(p);
        assert_eq!(hardened.markups()[0].end, 2);
    }

    #[test]
    fn test_fill_if_empty() {
        let p = fill_if_empty(Paragraph::with_kind("", scrivener_document::BlockKind::Quote));
        assert_eq!(p.text(), "\n");
        assert_eq!(p.kind(), scrivener_document::BlockKind::Quote);
    }
}
