//! # Deltas
//!
//! A delta is a single described mutation of the paragraph or section arrays.
//! Deltas are the only way the document changes: editing commands and
//! importers produce them, the [`View`](crate::View) applies them.
//!
//! ## Structural rules
//!
//! | Delta              | Valid index                         |
//! |--------------------|-------------------------------------|
//! | `ParagraphInsert`  | `0..=len` (append at `len`)         |
//! | `ParagraphUpdate`  | `0..len`                            |
//! | `ParagraphDelete`  | `0..len`, and never the last one    |
//! | `SectionInsert`    | `0..len`, not already a section     |
//! | `SectionDelete`    | an existing section start           |
//!
//! Section starts follow their paragraphs: inserting a paragraph moves every
//! section at or after it down (except a section at 0), deleting one moves
//! later sections up. Starts that fall off the end or collide are pruned.

use crate::errors::{EditorError, EditorResult};
use scrivener_document::{normalize_sections, Paragraph, Section};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Delta {
    ParagraphInsert { index: usize, paragraph: Paragraph },
    ParagraphUpdate { index: usize, paragraph: Paragraph },
    ParagraphDelete { index: usize },
    SectionInsert { index: usize },
    SectionDelete { index: usize },
}

impl Delta {
    pub fn insert(index: usize, paragraph: Paragraph) -> Self {
        Delta::ParagraphInsert { index, paragraph }
    }

    pub fn update(index: usize, paragraph: Paragraph) -> Self {
        Delta::ParagraphUpdate { index, paragraph }
    }

    pub fn delete(index: usize) -> Self {
        Delta::ParagraphDelete { index }
    }

    pub fn section_insert(index: usize) -> Self {
        Delta::SectionInsert { index }
    }

    pub fn section_delete(index: usize) -> Self {
        Delta::SectionDelete { index }
    }

    pub fn index(&self) -> usize {
        match self {
            Delta::ParagraphInsert { index, .. }
            | Delta::ParagraphUpdate { index, .. }
            | Delta::ParagraphDelete { index }
            | Delta::SectionInsert { index }
            | Delta::SectionDelete { index } => *index,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Delta::ParagraphInsert { .. } => "paragraphInsert",
            Delta::ParagraphUpdate { .. } => "paragraphUpdate",
            Delta::ParagraphDelete { .. } => "paragraphDelete",
            Delta::SectionInsert { .. } => "sectionInsert",
            Delta::SectionDelete { .. } => "sectionDelete",
        }
    }

    pub fn paragraph(&self) -> Option<&Paragraph> {
        match self {
            Delta::ParagraphInsert { paragraph, .. } | Delta::ParagraphUpdate { paragraph, .. } => {
                Some(paragraph)
            }
            _ => None,
        }
    }

    /// Whether the delta changes paragraph count or section layout
    pub fn is_structural(&self) -> bool {
        !matches!(self, Delta::ParagraphUpdate { .. })
    }
}

/// Paragraph count and section layout, the part of a document that
/// structural validation looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Shape {
    pub len: usize,
    pub sections: Vec<Section>,
}

impl Shape {
    pub fn new(len: usize, sections: &[Section]) -> Self {
        Self {
            len,
            sections: sections.to_vec(),
        }
    }

    pub fn is_section_start(&self, index: usize) -> bool {
        self.sections.iter().any(|s| s.start == index)
    }

    /// Validate `delta` against this shape, then apply its structural effect
    pub fn apply(&mut self, delta: &Delta) -> EditorResult<()> {
        self.validate(delta)?;

        match *delta {
            Delta::ParagraphInsert { index, .. } => {
                for section in &mut self.sections {
                    if section.start >= index && section.start > 0 {
                        section.start += 1;
                    }
                }
                self.len += 1;
            }
            Delta::ParagraphUpdate { .. } => {}
            Delta::ParagraphDelete { index } => {
                for section in &mut self.sections {
                    if section.start > index {
                        section.start -= 1;
                    }
                }
                self.len -= 1;
                normalize_sections(&mut self.sections, self.len);
            }
            Delta::SectionInsert { index } => {
                self.sections.push(Section::new(index));
                self.sections.sort();
            }
            Delta::SectionDelete { index } => {
                self.sections.retain(|s| s.start != index);
            }
        }
        Ok(())
    }

    fn validate(&self, delta: &Delta) -> EditorResult<()> {
        let len = self.len;
        match *delta {
            Delta::ParagraphInsert { index, .. } if index > len => Err(EditorError::structural(
                format!("paragraphInsert at {} is outside 0..={}", index, len),
            )),
            Delta::ParagraphUpdate { index, .. } | Delta::ParagraphDelete { index }
                if index >= len =>
            {
                Err(EditorError::structural(format!(
                    "{} at {} is outside 0..{}",
                    delta.name(),
                    index,
                    len
                )))
            }
            Delta::ParagraphDelete { .. } if len == 1 => Err(EditorError::structural(
                "cannot delete the only remaining paragraph",
            )),
            Delta::SectionInsert { index } if index >= len => Err(EditorError::structural(
                format!("sectionInsert at {} is outside 0..{}", index, len),
            )),
            Delta::SectionInsert { index } if self.is_section_start(index) => Err(
                EditorError::structural(format!("a section already starts at {}", index)),
            ),
            Delta::SectionDelete { index } if !self.is_section_start(index) => Err(
                EditorError::structural(format!("no section starts at {}", index)),
            ),
            _ => Ok(()),
        }
    }
}
