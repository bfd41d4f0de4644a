//! # Editing Commands
//!
//! Each command reads the view's selection and paragraphs, computes new
//! paragraphs and a delta batch, resolves it, and moves the selection.
//! Commands never touch the arrays directly.
//!
//! | Name             | Command                      |
//! |------------------|------------------------------|
//! | `backspace`      | [`Command::Backspace`]       |
//! | `forwardDelete`  | [`Command::ForwardDelete`]   |
//! | `newline`        | [`Command::Newline`]         |
//! | `newParagraph`   | [`Command::NewParagraph`]    |
//! | `newSection`     | [`Command::NewSection`]      |
//! | `spacebar.auto`  | [`Command::Space`]           |
//! | `paste`          | [`Command::Paste`]           |
//! | `cut`            | [`Command::Cut`]             |

mod breaks;
mod clipboard;
mod delete;
mod normalize;
mod space;

pub use breaks::{new_paragraph, new_section, newline};
pub use clipboard::{cut, paste};
pub use delete::{backspace, delete_range, forward_delete};
pub use space::{insert_space, Space};

use crate::errors::{EditorError, EditorResult};
use crate::surface::Surface;
use crate::view::View;
use scrivener_document::Fragment;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Backspace,
    ForwardDelete,
    Newline,
    NewParagraph,
    NewSection,
    Space(Space),
    Paste(Fragment),
    Cut,
}

/// What a command hands back to the input layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    /// Plain-text serialization of what a cut removed
    Cut(String),
}

impl Command {
    /// Look up an argument-free command by its dispatch name
    ///
    /// `paste` needs a fragment, so it is built with [`Command::Paste`]
    /// directly.
    pub fn from_name(name: &str) -> EditorResult<Command> {
        match name {
            "backspace" => Ok(Command::Backspace),
            "forwardDelete" => Ok(Command::ForwardDelete),
            "newline" => Ok(Command::Newline),
            "newParagraph" => Ok(Command::NewParagraph),
            "newSection" => Ok(Command::NewSection),
            "spacebar.auto" => Ok(Command::Space(Space::Auto)),
            "cut" => Ok(Command::Cut),
            "paste" => Err(EditorError::validation("paste needs a fragment to insert")),
            other => Err(EditorError::validation(format!("unknown command: {}", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Backspace => "backspace",
            Command::ForwardDelete => "forwardDelete",
            Command::Newline => "newline",
            Command::NewParagraph => "newParagraph",
            Command::NewSection => "newSection",
            Command::Space(Space::Auto) => "spacebar.auto",
            Command::Space(Space::Char(_)) => "spacebar.char",
            Command::Paste(_) => "paste",
            Command::Cut => "cut",
        }
    }

    #[instrument(skip(self, view), fields(command = self.name(), selection = %view.selection()))]
    pub fn execute<S: Surface>(&self, view: &mut View<S>) -> EditorResult<CommandOutcome> {
        match self {
            Command::Backspace => backspace(view)?,
            Command::ForwardDelete => forward_delete(view)?,
            Command::Newline => newline(view)?,
            Command::NewParagraph => new_paragraph(view)?,
            Command::NewSection => new_section(view)?,
            Command::Space(space) => insert_space(view, *space)?,
            Command::Paste(fragment) => paste(view, fragment)?,
            Command::Cut => return cut(view).map(CommandOutcome::Cut),
        }
        Ok(CommandOutcome::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use scrivener_document::{Document, Markup, MarkupKind, Paragraph, Section, Selection};

    fn view_of(texts: &[&str]) -> View<MemorySurface> {
        view_with(texts.iter().map(|t| Paragraph::new(*t)).collect(), vec![0])
    }

    fn view_with(paragraphs: Vec<Paragraph>, sections: Vec<usize>) -> View<MemorySurface> {
        let document = Document::new(
            paragraphs,
            sections.into_iter().map(Section::new).collect(),
        )
        .unwrap();
        let surface = MemorySurface::from_document(&document);
        View::new(document, surface).unwrap()
    }

    fn texts(view: &View<MemorySurface>) -> Vec<&str> {
        view.paragraphs().iter().map(Paragraph::text).collect()
    }

    fn run(view: &mut View<MemorySurface>, command: Command) {
        command.execute(view).unwrap();
        view.flush().unwrap();
        assert_eq!(view.surface().texts(), texts(view));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Command::from_name("backspace").unwrap(), Command::Backspace);
        assert_eq!(
            Command::from_name("spacebar.auto").unwrap(),
            Command::Space(Space::Auto)
        );
        assert!(matches!(
            Command::from_name("paste"),
            Err(EditorError::Validation(_))
        ));
        assert!(Command::from_name("explode").is_err());
    }

    #[test]
    fn test_backspace_merges_paragraphs() {
        let mut view = view_with(
            vec![Paragraph::new("Stuff"), Paragraph::new("things")],
            vec![0, 1],
        );
        view.set_selection(Selection::caret(1, 0)).unwrap();
        run(&mut view, Command::Backspace);

        assert_eq!(texts(&view), vec!["Stuffthings"]);
        assert_eq!(view.sections(), &[Section::new(0)]);
        assert_eq!(view.selection(), Selection::caret(0, 5));
    }

    #[test]
    fn test_backspace_lands_before_terminator() {
        let mut view = view_of(&["Stuff\n", "things"]);
        view.set_selection(Selection::caret(1, 0)).unwrap();
        run(&mut view, Command::Backspace);

        assert_eq!(texts(&view), vec!["Stuffthings"]);
        assert_eq!(view.selection(), Selection::caret(0, 5));
    }

    #[test]
    fn test_backspace_single_char() {
        let mut view = view_of(&["abc"]);
        view.set_selection(Selection::caret(0, 2)).unwrap();
        run(&mut view, Command::Backspace);
        assert_eq!(texts(&view), vec!["ac"]);
        assert_eq!(view.selection(), Selection::caret(0, 1));
    }

    #[test]
    fn test_backspace_at_document_start_is_noop() {
        let mut view = view_of(&["abc"]);
        Command::Backspace.execute(&mut view).unwrap();
        assert_eq!(texts(&view), vec!["abc"]);
        assert!(!view.is_flush_scheduled());
    }

    #[test]
    fn test_backspace_last_char_leaves_soft_break() {
        let mut view = view_of(&["a"]);
        view.set_selection(Selection::caret(0, 1)).unwrap();
        run(&mut view, Command::Backspace);
        assert_eq!(texts(&view), vec!["\n"]);
        assert_eq!(view.selection(), Selection::caret(0, 0));
    }

    #[test]
    fn test_forward_delete_merges_next() {
        let mut view = view_of(&["Stuff\n", "things", "more"]);
        view.set_selection(Selection::caret(0, 5)).unwrap();
        run(&mut view, Command::ForwardDelete);
        assert_eq!(texts(&view), vec!["Stuffthings", "more"]);
        assert_eq!(view.selection(), Selection::caret(0, 5));
    }

    #[test]
    fn test_forward_delete_before_terminator_joins() {
        let mut view = view_of(&["abc\n", "def"]);
        assert!(view.set_selection(Selection::caret(0, 4)).is_err());

        view.set_selection(Selection::caret(0, 3)).unwrap();
        run(&mut view, Command::ForwardDelete);
        assert_eq!(texts(&view), vec!["abcdef"]);
        assert_eq!(view.selection(), Selection::caret(0, 3));
    }

    #[test]
    fn test_forward_delete_at_document_end_is_noop() {
        let mut view = view_of(&["ab"]);
        view.set_selection(Selection::caret(0, 2)).unwrap();
        view.flush().unwrap();
        Command::ForwardDelete.execute(&mut view).unwrap();
        assert_eq!(texts(&view), vec!["ab"]);
    }

    #[test]
    fn test_delete_range_across_paragraphs_and_sections() {
        let mut view = view_with(
            vec![
                Paragraph::new("One two"),
                Paragraph::new("middle"),
                Paragraph::new("three four"),
                Paragraph::new("after"),
            ],
            vec![0, 2, 3],
        );
        // Dragged backwards from "three |four" to "One |two"
        view.set_selection(Selection::new((2, 6), (0, 4))).unwrap();
        run(&mut view, Command::Backspace);

        assert_eq!(texts(&view), vec!["One four", "after"]);
        assert_eq!(view.sections(), &[Section::new(0), Section::new(1)]);
        assert_eq!(view.selection(), Selection::caret(0, 4));
    }

    #[test]
    fn test_delete_range_hardens_edge_space() {
        let mut view = view_of(&["ab cd"]);
        view.set_selection(Selection::new((0, 0), (0, 2))).unwrap();
        run(&mut view, Command::ForwardDelete);
        assert_eq!(texts(&view), vec!["\u{00A0}cd"]);
    }

    #[test]
    fn test_newline_inserts_soft_break() {
        let mut view = view_of(&["ab"]);
        view.set_selection(Selection::caret(0, 1)).unwrap();
        run(&mut view, Command::Newline);
        assert_eq!(texts(&view), vec!["a\nb"]);
        assert_eq!(view.selection(), Selection::caret(0, 2));
    }

    #[test]
    fn test_double_soft_break_promoted_to_paragraph() {
        let mut view = view_of(&["a\nb"]);
        view.set_selection(Selection::caret(0, 2)).unwrap();
        run(&mut view, Command::Newline);
        assert_eq!(texts(&view), vec!["a\n", "b"]);
        assert_eq!(view.selection(), Selection::caret(1, 0));
    }

    #[test]
    fn test_newline_at_end_promoted() {
        let mut view = view_of(&["ab"]);
        view.set_selection(Selection::caret(0, 2)).unwrap();
        run(&mut view, Command::Newline);
        assert_eq!(texts(&view), vec!["ab\n", "\n"]);
    }

    #[test]
    fn test_new_paragraph_splits() {
        let mut view = view_with(
            vec![Paragraph::with_kind("Hello world", scrivener_document::BlockKind::Quote)],
            vec![0],
        );
        view.set_selection(Selection::caret(0, 5)).unwrap();
        run(&mut view, Command::NewParagraph);

        assert_eq!(texts(&view), vec!["Hello\n", "\u{00A0}world"]);
        assert_eq!(view.paragraphs()[1].kind(), scrivener_document::BlockKind::Quote);
        assert_eq!(view.selection(), Selection::caret(1, 0));
    }

    #[test]
    fn test_new_paragraph_at_end_inherits_kind() {
        let mut view = view_with(
            vec![Paragraph::with_kind("Title", scrivener_document::BlockKind::Heading1)],
            vec![0],
        );
        view.set_selection(Selection::caret(0, 5)).unwrap();
        run(&mut view, Command::NewParagraph);

        assert_eq!(texts(&view), vec!["Title\n", "\n"]);
        assert_eq!(view.paragraphs()[1].kind(), scrivener_document::BlockKind::Heading1);
    }

    #[test]
    fn test_new_paragraph_replaces_range() {
        let mut view = view_of(&["abc", "def", "ghi"]);
        view.set_selection(Selection::new((0, 1), (2, 2))).unwrap();
        run(&mut view, Command::NewParagraph);
        assert_eq!(texts(&view), vec!["a\n", "i"]);
    }

    #[test]
    fn test_new_section_adds_boundary() {
        let mut view = view_of(&["abcd", "next"]);
        view.set_selection(Selection::caret(0, 2)).unwrap();
        run(&mut view, Command::NewSection);

        assert_eq!(texts(&view), vec!["ab\n", "cd", "next"]);
        assert_eq!(view.sections(), &[Section::new(0), Section::new(1)]);
        assert!(view.surface().blocks()[1].section_start);
    }

    #[test]
    fn test_space_goes_before_terminator() {
        let mut view = view_of(&["abc\n", "def"]);
        assert!(view.set_selection(Selection::caret(0, 4)).is_err());

        view.set_selection(Selection::caret(0, 3)).unwrap();
        run(&mut view, Command::Space(Space::Auto));
        assert_eq!(texts(&view), vec!["abc\u{00A0}\n", "def"]);
        assert_eq!(view.selection(), Selection::caret(0, 4));
    }

    #[test]
    fn test_space_at_paragraph_end_is_nbsp() {
        let mut view = view_of(&["1"]);
        view.set_selection(Selection::caret(0, 1)).unwrap();
        run(&mut view, Command::Space(Space::Auto));
        assert_eq!(texts(&view), vec!["1\u{00A0}"]);
        assert_eq!(view.selection(), Selection::caret(0, 2));
    }

    #[test]
    fn test_space_mid_word_is_plain() {
        let mut view = view_of(&["EverlastingLight"]);
        view.set_selection(Selection::caret(0, 11)).unwrap();
        run(&mut view, Command::Space(Space::Auto));
        assert_eq!(texts(&view), vec!["Everlasting Light"]);
    }

    #[test]
    fn test_space_before_existing_space_advances() {
        let mut view = view_of(&["a b"]);
        view.set_selection(Selection::caret(0, 1)).unwrap();
        view.flush().unwrap();
        Command::Space(Space::Auto).execute(&mut view).unwrap();

        assert_eq!(texts(&view), vec!["a b"]);
        assert_eq!(view.selection(), Selection::caret(0, 2));
        assert!(view.pending_deltas().is_empty());
    }

    #[test]
    fn test_space_over_selection() {
        let mut view = view_of(&["One ABC Two"]);
        view.set_selection(Selection::new((0, 4), (0, 7))).unwrap();
        run(&mut view, Command::Space(Space::Auto));
        assert_eq!(texts(&view), vec!["One Two"]);
    }

    #[test]
    fn test_space_after_link_does_not_extend_it() {
        let link = Markup::link(0, 4, "https://example.com");
        let bold = Markup::new(MarkupKind::Bold, 0, 4);
        let mut view = view_with(
            vec![Paragraph::new("siteX")
                .with_markup(link.clone())
                .with_markup(bold)],
            vec![0],
        );
        view.set_selection(Selection::caret(0, 4)).unwrap();
        run(&mut view, Command::Space(Space::Auto));

        let p = &view.paragraphs()[0];
        assert_eq!(p.text(), "site X");
        assert_eq!(
            p.markups(),
            &[link, Markup::new(MarkupKind::Bold, 0, 5)]
        );
    }

    #[test]
    fn test_explicit_space_rejects_non_space() {
        let mut view = view_of(&["ab"]);
        let err = Command::Space(Space::Char('x')).execute(&mut view).unwrap_err();
        assert!(matches!(err, EditorError::Validation(_)));
        assert!(!view.is_flush_scheduled());
    }

    #[test]
    fn test_explicit_space_inserts_given_char() {
        let mut view = view_of(&["ab"]);
        view.set_selection(Selection::caret(0, 1)).unwrap();
        run(&mut view, Command::Space(Space::Char('\u{2009}')));
        assert_eq!(texts(&view), vec!["a\u{2009}b"]);
    }

    #[test]
    fn test_paste_single_paragraph() {
        let mut view = view_of(&["Hello world"]);
        view.set_selection(Selection::new((0, 6), (0, 11))).unwrap();
        run(
            &mut view,
            Command::Paste(Fragment::new(vec![Paragraph::new("there")])),
        );
        assert_eq!(texts(&view), vec!["Hello there"]);
        assert_eq!(view.selection(), Selection::caret(0, 11));
    }

    #[test]
    fn test_paste_collapses_colliding_spaces() {
        let mut view = view_of(&["One Two"]);
        view.set_selection(Selection::caret(0, 4)).unwrap();
        run(
            &mut view,
            Command::Paste(Fragment::new(vec![Paragraph::new(" big ")])),
        );
        assert_eq!(texts(&view), vec!["One big Two"]);
    }

    #[test]
    fn test_paste_multiple_paragraphs_with_sections() {
        let mut view = view_of(&["Start end", "tail"]);
        view.set_selection(Selection::caret(0, 6)).unwrap();
        let fragment = Fragment::with_sections(
            vec![
                Paragraph::new("one"),
                Paragraph::new("two"),
                Paragraph::new("three "),
            ],
            vec![Section::new(0), Section::new(2)],
        );
        run(&mut view, Command::Paste(fragment));

        assert_eq!(texts(&view), vec!["Start one", "two", "three end", "tail"]);
        assert_eq!(view.sections(), &[Section::new(0), Section::new(2)]);
        assert_eq!(view.selection(), Selection::caret(2, 6));
    }

    #[test]
    fn test_cut_returns_plain_text() {
        let mut view = view_of(&["Hello world\n", "middle", "last line"]);
        view.set_selection(Selection::new((0, 6), (2, 4))).unwrap();
        let outcome = Command::Cut.execute(&mut view).unwrap();
        view.flush().unwrap();

        assert_eq!(
            outcome,
            CommandOutcome::Cut("world\n\nmiddle\n\nlast".to_string())
        );
        assert_eq!(texts(&view), vec!["Hello line"]);
    }

    #[test]
    fn test_cut_collapsed_is_empty() {
        let mut view = view_of(&["abc"]);
        assert_eq!(
            Command::Cut.execute(&mut view).unwrap(),
            CommandOutcome::Cut(String::new())
        );
        assert_eq!(texts(&view), vec!["abc"]);
    }
}
