//! # Presentation Surface
//!
//! The live, user-visible rendering of the document is an external
//! collaborator. The view only talks to it through [`Surface`]: replay deltas
//! in order, report the element count, place the caret.
//!
//! [`MemorySurface`] is a recording implementation used by tests and the CLI.

use crate::delta::Delta;
use crate::errors::{EditorError, EditorResult};
use scrivener_document::{Document, Markup, Paragraph, Selection};

/// One block element as the surface holds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceBlock {
    /// Element tag, resolved to a block kind when read back
    pub tag: String,
    pub text: String,
    pub markups: Vec<Markup>,
    /// Whether a section boundary is rendered before this block
    pub section_start: bool,
}

impl SurfaceBlock {
    pub fn render(paragraph: &Paragraph) -> Self {
        Self {
            tag: paragraph.kind().tag().to_string(),
            text: paragraph.text().to_string(),
            markups: paragraph.markups().to_vec(),
            section_start: false,
        }
    }
}

pub trait Surface {
    /// Apply one delta to the live surface
    fn apply(&mut self, delta: &Delta) -> EditorResult<()>;

    /// Number of block elements currently on the surface
    fn element_count(&self) -> usize;

    /// Put the caret/selection on the surface
    fn place_caret(&mut self, selection: &Selection);

    /// Read a block back, for consistency checks
    fn block(&self, index: usize) -> Option<SurfaceBlock>;
}

/// In-memory surface that records what it was told to do
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    blocks: Vec<SurfaceBlock>,
    caret: Option<Selection>,
    applied: Vec<Delta>,
    reject_next: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface already showing `document`
    pub fn from_document(document: &Document) -> Self {
        let mut blocks: Vec<SurfaceBlock> =
            document.paragraphs.iter().map(SurfaceBlock::render).collect();
        for section in &document.sections {
            if let Some(block) = blocks.get_mut(section.start) {
                block.section_start = true;
            }
        }
        Self {
            blocks,
            ..Self::default()
        }
    }

    pub fn blocks(&self) -> &[SurfaceBlock] {
        &self.blocks
    }

    pub fn texts(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.text.as_str()).collect()
    }

    pub fn caret(&self) -> Option<Selection> {
        self.caret
    }

    /// Every delta replayed so far, in order
    pub fn applied(&self) -> &[Delta] {
        &self.applied
    }

    /// Remove a block behind the model's back
    pub fn drop_block(&mut self, index: usize) {
        if index < self.blocks.len() {
            self.blocks.remove(index);
        }
    }

    /// Overwrite a block's tag behind the model's back
    pub fn retag(&mut self, index: usize, tag: impl Into<String>) {
        if let Some(block) = self.blocks.get_mut(index) {
            block.tag = tag.into();
        }
    }

    /// Make the next `apply` fail
    pub fn reject_next(&mut self) {
        self.reject_next = true;
    }

    fn check(&self, index: usize, upper: usize, delta: &Delta) -> EditorResult<()> {
        if index < upper {
            Ok(())
        } else {
            Err(EditorError::sync(format!(
                "{} at {} but the surface holds {} elements",
                delta.name(),
                index,
                self.blocks.len()
            )))
        }
    }
}

impl Surface for MemorySurface {
    fn apply(&mut self, delta: &Delta) -> EditorResult<()> {
        if std::mem::take(&mut self.reject_next) {
            return Err(EditorError::sync(format!("surface rejected {}", delta.name())));
        }

        match delta {
            Delta::ParagraphInsert { index, paragraph } => {
                self.check(*index, self.blocks.len() + 1, delta)?;
                let mut block = SurfaceBlock::render(paragraph);
                // A section at the very top stays at the top
                if *index == 0 {
                    if let Some(first) = self.blocks.first_mut() {
                        block.section_start = std::mem::take(&mut first.section_start);
                    }
                }
                self.blocks.insert(*index, block);
            }
            Delta::ParagraphUpdate { index, paragraph } => {
                self.check(*index, self.blocks.len(), delta)?;
                let section_start = self.blocks[*index].section_start;
                self.blocks[*index] = SurfaceBlock {
                    section_start,
                    ..SurfaceBlock::render(paragraph)
                };
            }
            Delta::ParagraphDelete { index } => {
                self.check(*index, self.blocks.len(), delta)?;
                let removed = self.blocks.remove(*index);
                if removed.section_start {
                    if let Some(next) = self.blocks.get_mut(*index) {
                        next.section_start = true;
                    }
                }
            }
            Delta::SectionInsert { index } => {
                self.check(*index, self.blocks.len(), delta)?;
                self.blocks[*index].section_start = true;
            }
            Delta::SectionDelete { index } => {
                self.check(*index, self.blocks.len(), delta)?;
                self.blocks[*index].section_start = false;
            }
        }
        self.applied.push(delta.clone());
        Ok(())
    }

    fn element_count(&self) -> usize {
        self.blocks.len()
    }

    fn place_caret(&mut self, selection: &Selection) {
        self.caret = Some(*selection);
    }

    fn block(&self, index: usize) -> Option<SurfaceBlock> {
        self.blocks.get(index).cloned()
    }
}
