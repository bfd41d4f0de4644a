//! # Scrivener Document
//!
//! Value types for the rich-text document model.
//!
//! ```text
//! Document
//!  ├─ paragraphs: [Paragraph { text, markups: [Markup], kind: BlockKind }]
//!  └─ sections:   [Section { start }]   boundary before paragraph `start`
//!
//! Selection { start: Position, end: Position }   (paragraph, char offset)
//! ```
//!
//! Everything here is a plain value. Mutation of a live document goes through
//! `scrivener-editor`'s delta engine.

mod document;
mod error;
mod kinds;
mod paragraph;
mod selection;
pub mod whitespace;

pub use document::{normalize_sections, to_plain_text, Document, Fragment, Section};
pub use error::{DocumentError, DocumentResult};
pub use kinds::{BlockKind, MarkupKind};
pub use paragraph::{Markup, Paragraph};
pub use selection::{Position, Selection};
