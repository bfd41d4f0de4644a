//! Character classes used by whitespace normalization
//!
//! All offsets in this crate are char (Unicode scalar) offsets.

/// Soft line break inside a paragraph
pub const SOFT_BREAK: char = '\n';

/// Plain space
pub const SPACE: char = ' ';

/// Non-breaking space
pub const NBSP: char = '\u{00A0}';

/// True for the plain space and every "exotic" horizontal space
pub fn is_space(ch: char) -> bool {
    ch == SPACE || is_exotic_space(ch)
}

/// Horizontal whitespace other than the plain space
pub fn is_exotic_space(ch: char) -> bool {
    matches!(
        ch,
        '\u{00A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the char at `char_idx`, or `text.len()` past the end
pub fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(text.len())
}

pub fn char_at(text: &str, char_idx: usize) -> Option<char> {
    text.chars().nth(char_idx)
}
