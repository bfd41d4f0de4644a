//! # Scrivener Editor
//!
//! In-place rich-text editing engine for Scrivener documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ input layer: keystrokes, clipboard          │
//! └─────────────────────────────────────────────┘
//!                     ↓ Command
//! ┌─────────────────────────────────────────────┐
//! │ commands: backspace, newline, paste, ...    │
//! │  - Read paragraphs + selection              │
//! │  - Compute replacement paragraphs           │
//! │  - Emit a delta batch                       │
//! └─────────────────────────────────────────────┘
//!                     ↓ resolve(deltas)
//! ┌─────────────────────────────────────────────┐
//! │ view: logical model + resolution engine     │
//! │  - Validate batch, apply synchronously      │
//! │  - Journal inverses for undo                │
//! │  - Queue deltas for the next flush          │
//! └─────────────────────────────────────────────┘
//!                     ↓ flush()
//! ┌─────────────────────────────────────────────┐
//! │ surface: presentation (DOM, memory, ...)    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Paragraphs are the source of truth**: the surface is a derived view
//! 2. **Deltas are the only way in**: commands never touch the arrays
//! 3. **Model first, surface later**: reads see a change immediately, the
//!    surface catches up on the next flush
//! 4. **Undo is delta-based**: entries are inverse/forward delta batches
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scrivener_editor::{Command, Document, Editor, EditorConfig, MemorySurface, Selection};
//!
//! let document = Document::from_plain_text("Hello world");
//! let surface = MemorySurface::from_document(&document);
//! let mut editor = Editor::new(document, surface, &EditorConfig::default())?;
//!
//! editor.view_mut().set_selection(Selection::caret(0, 5))?;
//! editor.execute(&Command::NewParagraph)?;
//! editor.tick(std::time::Instant::now())?;
//!
//! editor.undo()?;
//! ```

pub mod commands;
mod config;
mod delta;
mod editor;
mod errors;
mod history;
mod notifications;
mod surface;
mod undo_stack;
mod view;

pub use commands::{Command, CommandOutcome, Space};
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use delta::Delta;
pub use editor::Editor;
pub use errors::{EditorError, EditorResult, ErrorKind};
pub use history::HistoryCapture;
pub use notifications::{ErrorChannel, ErrorPolicy, ErrorReporter, Notification};
pub use surface::{MemorySurface, Surface, SurfaceBlock};
pub use undo_stack::{Replay, UndoEntry, UndoManager};
pub use view::{Journal, View};

// Re-export document types for convenience
pub use scrivener_document::{
    BlockKind, Document, Fragment, Markup, MarkupKind, Paragraph, Position, Section, Selection,
};
