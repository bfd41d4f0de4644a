//! # Selection Model
//!
//! A selection is a pair of `(paragraph, offset)` endpoints. `start` is where
//! the user anchored, `end` is where they dragged to, so `end` may come before
//! `start`. Use [`Selection::absolute`] when document order matters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A caret position: paragraph index plus char offset within it
///
/// Ordering is lexicographic on `(paragraph, offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub paragraph: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(paragraph: usize, offset: usize) -> Self {
        Self { paragraph, offset }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.paragraph, self.offset)
    }
}

impl From<(usize, usize)> for Position {
    fn from((paragraph, offset): (usize, usize)) -> Self {
        Self { paragraph, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    pub fn new(start: impl Into<Position>, end: impl Into<Position>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Collapsed selection at a single position
    pub fn caret(paragraph: usize, offset: usize) -> Self {
        let at = Position::new(paragraph, offset);
        Self { start: at, end: at }
    }

    pub fn collapsed_at(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// True when the user dragged right-to-left
    pub fn is_backwards(&self) -> bool {
        self.end < self.start
    }

    pub fn absolute_start(&self) -> Position {
        self.start.min(self.end)
    }

    pub fn absolute_end(&self) -> Position {
        self.start.max(self.end)
    }

    /// The same range with endpoints in document order
    pub fn absolute(&self) -> Selection {
        Selection {
            start: self.absolute_start(),
            end: self.absolute_end(),
        }
    }

    /// Copy of this selection with `end` replaced
    pub fn with_end(&self, end: Position) -> Selection {
        Selection {
            start: self.start,
            end,
        }
    }

    pub fn with_start(&self, start: Position) -> Selection {
        Selection {
            start,
            end: self.end,
        }
    }

    /// Collapse onto the absolute start
    pub fn collapse_to_start(&self) -> Selection {
        Selection::collapsed_at(self.absolute_start())
    }

    /// Collapse onto the absolute end
    pub fn collapse_to_end(&self) -> Selection {
        Selection::collapsed_at(self.absolute_end())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_collapsed() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
    }

    #[test]
    fn test_collapsed() {
        let s = Selection::caret(1, 4);
        assert!(s.is_collapsed());
        assert!(!s.is_backwards());
        assert_eq!(s.absolute(), s);
    }

    #[test]
    fn test_backwards_selection_absolute() {
        let s = Selection::new((2, 1), (0, 5));
        assert!(s.is_backwards());
        assert_eq!(s.absolute_start(), Position::new(0, 5));
        assert_eq!(s.absolute_end(), Position::new(2, 1));
        assert!(!s.absolute().is_backwards());
    }

    #[test]
    fn test_copies_do_not_alias() {
        let original = Selection::caret(0, 0);
        let mut copy = original;
        copy.end = Position::new(0, 3);
        assert!(original.is_collapsed());
        assert!(!copy.is_collapsed());
    }

    #[test]
    fn test_collapse_helpers() {
        let s = Selection::new((1, 2), (0, 1));
        assert_eq!(s.collapse_to_start(), Selection::caret(0, 1));
        assert_eq!(s.collapse_to_end(), Selection::caret(1, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Selection::caret(1, 2).to_string(), "1:2");
        assert_eq!(Selection::new((0, 1), (2, 3)).to_string(), "0:1-2:3");
    }
}
