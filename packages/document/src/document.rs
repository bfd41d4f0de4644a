//! # Document Containers
//!
//! [`Document`] is a complete, valid document: at least one paragraph and a
//! normalized section list. [`Fragment`] is a run of paragraphs produced by an
//! importer (for example a clipboard sanitizer) that has not been placed in a
//! document yet.

use crate::error::{DocumentError, DocumentResult};
use crate::kinds::BlockKind;
use crate::paragraph::Paragraph;
use serde::{Deserialize, Serialize};

/// A section boundary precedes the paragraph at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Section {
    pub start: usize,
}

impl Section {
    pub fn new(start: usize) -> Self {
        Self { start }
    }
}

/// Sort sections and prune duplicate or out-of-range starts
pub fn normalize_sections(sections: &mut Vec<Section>, paragraph_count: usize) {
    sections.retain(|s| s.start < paragraph_count);
    sections.sort();
    sections.dedup();
}

/// Serialize paragraphs to portable text: paragraphs joined by a blank line,
/// soft breaks kept as single newlines, section boundaries not represented.
pub fn to_plain_text(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(Paragraph::plain_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn paragraphs_from_plain_text(text: &str) -> Vec<Paragraph> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(|chunk| chunk.trim_matches('\n'))
        .filter(|chunk| !chunk.is_empty())
        .map(Paragraph::new)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    /// Validate and normalize a document
    pub fn new(paragraphs: Vec<Paragraph>, mut sections: Vec<Section>) -> DocumentResult<Self> {
        if paragraphs.is_empty() {
            return Err(DocumentError::invalid_document(
                "a document needs at least one paragraph",
            ));
        }
        normalize_sections(&mut sections, paragraphs.len());
        Ok(Self {
            paragraphs,
            sections,
        })
    }

    /// Import plain text: blank lines separate paragraphs, single newlines
    /// become soft breaks. Empty input yields a single empty paragraph.
    pub fn from_plain_text(text: &str) -> Self {
        let mut paragraphs = paragraphs_from_plain_text(text);
        if paragraphs.is_empty() {
            paragraphs.push(Paragraph::soft_break(BlockKind::Paragraph));
        }
        Self {
            paragraphs,
            sections: vec![Section::new(0)],
        }
    }

    pub fn to_plain_text(&self) -> String {
        to_plain_text(&self.paragraphs)
    }

    /// Re-validate after deserialization
    pub fn validated(self) -> DocumentResult<Self> {
        Self::new(self.paragraphs, self.sections)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self {
            paragraphs: vec![Paragraph::soft_break(BlockKind::Paragraph)],
            sections: vec![Section::new(0)],
        }
    }
}

/// Paragraphs waiting to be spliced into a document
///
/// Section starts are relative to the fragment's first paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fragment {
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Fragment {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            sections: Vec::new(),
        }
    }

    pub fn with_sections(paragraphs: Vec<Paragraph>, mut sections: Vec<Section>) -> Self {
        normalize_sections(&mut sections, paragraphs.len());
        Self {
            paragraphs,
            sections,
        }
    }

    pub fn from_plain_text(text: &str) -> Self {
        Self::new(paragraphs_from_plain_text(text))
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}
