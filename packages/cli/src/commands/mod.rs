pub mod inspect;
pub mod replay;
pub mod script;

pub use inspect::{inspect, InspectArgs};
pub use replay::{replay, ReplayArgs};

use anyhow::{Context, Result};
use scrivener_document::Document;
use std::fs;
use std::path::Path;

/// Load a document: `.json` files use the serde form, anything else is plain text
pub fn load_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;

    if path.extension().map(|e| e == "json").unwrap_or(false) {
        let document: Document = serde_json::from_str(&content)
            .with_context(|| format!("Invalid document JSON in {}", path.display()))?;
        Ok(document.validated()?)
    } else {
        Ok(Document::from_plain_text(&content))
    }
}
