//! # Paragraph Model
//!
//! A paragraph is one block of text plus its inline markups and block kind.
//!
//! ## Invariants
//!
//! - Every markup satisfies `0 <= start < end <= len` (char offsets)
//! - Markups of the same kind never overlap
//! - Markups are sorted by `(start, kind)`
//!
//! Paragraphs are values: every operation returns a new paragraph and
//! out-of-range offsets are clamped rather than rejected.

use crate::kinds::{BlockKind, MarkupKind};
use crate::whitespace::{char_len, char_to_byte_idx, SOFT_BREAK};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Bound, Range, RangeBounds};

/// Inline formatting span over a half-open char range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    pub kind: MarkupKind,
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
}

impl Markup {
    pub fn new(kind: MarkupKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            attrs: BTreeMap::new(),
        }
    }

    pub fn link(start: usize, end: usize, href: impl Into<String>) -> Self {
        Self::new(MarkupKind::Link, start, end).with_attr("href", href)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }

    fn shifted(mut self, by: usize) -> Self {
        self.start += by;
        self.end += by;
        self
    }
}

/// One logical block of text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ParagraphData", into = "ParagraphData")]
pub struct Paragraph {
    text: String,
    markups: Vec<Markup>,
    kind: BlockKind,
}

#[derive(Serialize, Deserialize)]
struct ParagraphData {
    text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    markups: Vec<Markup>,
    #[serde(rename = "type", default)]
    kind: BlockKind,
}

impl From<ParagraphData> for Paragraph {
    fn from(data: ParagraphData) -> Self {
        Paragraph::from_parts(data.text, data.markups, data.kind)
    }
}

impl From<Paragraph> for ParagraphData {
    fn from(paragraph: Paragraph) -> Self {
        ParagraphData {
            text: paragraph.text,
            markups: paragraph.markups,
            kind: paragraph.kind,
        }
    }
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_kind(text, BlockKind::Paragraph)
    }

    pub fn with_kind(text: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            text: text.into(),
            markups: Vec::new(),
            kind,
        }
    }

    /// Build a paragraph, clamping and normalizing the given markups
    pub fn from_parts(text: impl Into<String>, markups: Vec<Markup>, kind: BlockKind) -> Self {
        let mut paragraph = Self {
            text: text.into(),
            markups,
            kind,
        };
        paragraph.normalize();
        paragraph
    }

    /// A paragraph holding nothing but a soft break, the canonical "empty" paragraph
    pub fn soft_break(kind: BlockKind) -> Self {
        Self::with_kind(SOFT_BREAK.to_string(), kind)
    }

    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markups.push(markup);
        self.normalize();
        self
    }

    pub fn retyped(mut self, kind: BlockKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn markups(&self) -> &[Markup] {
        &self.markups
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }

    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    pub fn ends_with_soft_break(&self) -> bool {
        self.last_char() == Some(SOFT_BREAK)
    }

    /// Length without the trailing soft-break terminator, if any
    pub fn content_len(&self) -> usize {
        let len = self.len();
        if self.ends_with_soft_break() {
            len - 1
        } else {
            len
        }
    }

    /// Text without the trailing soft-break terminator
    pub fn plain_text(&self) -> &str {
        self.text.strip_suffix(SOFT_BREAK).unwrap_or(&self.text)
    }

    /// Whether the paragraph holds only a soft break (or nothing at all)
    pub fn is_blank(&self) -> bool {
        self.content_len() == 0
    }

    /// Markups of `kind` whose range ends exactly at `offset`
    pub fn markups_ending_at(&self, kind: MarkupKind, offset: usize) -> impl Iterator<Item = &Markup> {
        self.markups
            .iter()
            .filter(move |m| m.kind == kind && m.end == offset)
    }

    /// Restrict the paragraph to a char range, re-basing markups onto the new start
    pub fn substr(&self, range: impl RangeBounds<usize>) -> Paragraph {
        let Range { start, end } = self.clamp_range(range);
        let byte_start = char_to_byte_idx(&self.text, start);
        let byte_end = char_to_byte_idx(&self.text, end);

        let markups = self
            .markups
            .iter()
            .filter_map(|m| {
                let s = m.start.max(start);
                let e = m.end.min(end);
                (s < e).then(|| Markup {
                    kind: m.kind,
                    start: s - start,
                    end: e - start,
                    attrs: m.attrs.clone(),
                })
            })
            .collect();

        Paragraph::from_parts(&self.text[byte_start..byte_end], markups, self.kind)
    }

    /// Concatenate `other` onto this paragraph, keeping this paragraph's kind
    ///
    /// Contiguous markups of the same kind are not merged across the join.
    pub fn append(&self, other: &Paragraph) -> Paragraph {
        let offset = self.len();
        let mut text = self.text.clone();
        text.push_str(&other.text);

        let markups = self
            .markups
            .iter()
            .cloned()
            .chain(other.markups.iter().cloned().map(|m| m.shifted(offset)))
            .collect();

        Paragraph::from_parts(text, markups, self.kind)
    }

    /// Insert text at `offset` the way typing does: markups that contain or
    /// end at the insertion point grow over the new text, markups starting
    /// at it move right.
    pub fn insert_text(&self, offset: usize, inserted: &str) -> Paragraph {
        let offset = offset.min(self.len());
        let n = char_len(inserted);
        let mut text = self.text.clone();
        text.insert_str(char_to_byte_idx(&self.text, offset), inserted);

        let markups = self
            .markups
            .iter()
            .cloned()
            .map(|mut m| {
                if m.start >= offset {
                    m = m.shifted(n);
                } else if m.end >= offset {
                    m.end += n;
                }
                m
            })
            .collect();

        Paragraph::from_parts(text, markups, self.kind)
    }

    /// Replace a char range with `replacement`
    ///
    /// Markups ending at or before the range start are untouched, markups
    /// after the range shift by the length difference, and boundaries that
    /// fall inside the replaced range are clamped to the replacement's end.
    pub fn replace_range(&self, range: impl RangeBounds<usize>, replacement: &str) -> Paragraph {
        let Range { start, end } = self.clamp_range(range);
        let replacement_len = char_len(replacement);
        let boundary = start + replacement_len;

        let mut text = String::with_capacity(self.text.len() + replacement.len());
        text.push_str(&self.text[..char_to_byte_idx(&self.text, start)]);
        text.push_str(replacement);
        text.push_str(&self.text[char_to_byte_idx(&self.text, end)..]);

        let remap = |pos: usize| -> usize {
            if pos <= start {
                pos
            } else if pos >= end {
                pos - end + boundary
            } else {
                pos.min(boundary)
            }
        };

        let markups = self
            .markups
            .iter()
            .filter_map(|m| {
                if m.end <= start {
                    return Some(m.clone());
                }
                let s = remap(m.start);
                let e = remap(m.end);
                (s < e).then(|| Markup {
                    kind: m.kind,
                    start: s,
                    end: e,
                    attrs: m.attrs.clone(),
                })
            })
            .collect();

        Paragraph::from_parts(text, markups, self.kind)
    }

    /// Replace every occurrence of `pattern`, left to right
    pub fn replace(&self, pattern: &str, replacement: &str) -> Paragraph {
        if pattern.is_empty() {
            return self.clone();
        }

        let pattern_len = char_len(pattern);
        let replacement_len = char_len(replacement);
        let matches: Vec<usize> = self
            .text
            .match_indices(pattern)
            .map(|(byte_idx, _)| char_len(&self.text[..byte_idx]))
            .collect();

        let mut result = self.clone();
        let mut drift: isize = 0;
        for found in matches {
            let start = (found as isize + drift) as usize;
            result = result.replace_range(start..start + pattern_len, replacement);
            drift += replacement_len as isize - pattern_len as isize;
        }
        result
    }

    /// Clear `kind` from a char range, splitting instances that straddle it
    pub fn remove_markup(&self, kind: MarkupKind, range: impl RangeBounds<usize>) -> Paragraph {
        let Range { start, end } = self.clamp_range(range);
        let mut markups = Vec::with_capacity(self.markups.len());

        for m in &self.markups {
            if m.kind != kind || m.end <= start || m.start >= end {
                markups.push(m.clone());
                continue;
            }
            if m.start < start {
                markups.push(Markup {
                    end: start,
                    ..m.clone()
                });
            }
            if m.end > end {
                markups.push(Markup {
                    start: end,
                    ..m.clone()
                });
            }
        }

        Paragraph::from_parts(self.text.clone(), markups, self.kind)
    }

    /// Structural equality on text, kind and (ordered) markups
    pub fn equals(&self, other: &Paragraph) -> bool {
        self == other
    }

    fn clamp_range(&self, range: impl RangeBounds<usize>) -> Range<usize> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .clamp(start, len);
        start..end
    }

    fn normalize(&mut self) {
        let len = self.len();
        let mut markups: Vec<Markup> = std::mem::take(&mut self.markups)
            .into_iter()
            .map(|mut m| {
                m.end = m.end.min(len);
                m
            })
            .filter(|m| !m.is_degenerate())
            .collect();
        markups.sort_by(|a, b| (a.start, a.kind, a.end).cmp(&(b.start, b.kind, b.end)));

        // Same-kind overlaps: identical attributes merge, otherwise the later
        // span yields the overlapped part.
        let mut normalized: Vec<Markup> = Vec::with_capacity(markups.len());
        for mut m in markups {
            if let Some(prev) = normalized
                .iter_mut()
                .rev()
                .find(|prev| prev.kind == m.kind)
            {
                if prev.end > m.start {
                    if prev.attrs == m.attrs {
                        prev.end = prev.end.max(m.end);
                        continue;
                    }
                    m.start = prev.end;
                    if m.is_degenerate() {
                        continue;
                    }
                }
            }
            normalized.push(m);
        }
        normalized.sort_by(|a, b| (a.start, a.kind).cmp(&(b.start, b.kind)));
        self.markups = normalized;
    }
}
