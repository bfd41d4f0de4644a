//! # Block and Markup Kinds
//!
//! Closed enumerations of the block types a paragraph can carry and the
//! inline formatting kinds a markup can carry. Element tags are resolved to
//! these once, at the model/surface boundary; nothing else in the engine
//! inspects tag names.

use crate::error::{DocumentError, DocumentResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Block type of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    #[default]
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    ListItem,
    OrderedListItem,
    Quote,
    Preformatted,
}

impl BlockKind {
    pub const ALL: [BlockKind; 11] = [
        BlockKind::Paragraph,
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::Heading4,
        BlockKind::Heading5,
        BlockKind::Heading6,
        BlockKind::ListItem,
        BlockKind::OrderedListItem,
        BlockKind::Quote,
        BlockKind::Preformatted,
    ];

    /// Element tag used for this block on the presentation surface
    pub fn tag(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "p",
            BlockKind::Heading1 => "h1",
            BlockKind::Heading2 => "h2",
            BlockKind::Heading3 => "h3",
            BlockKind::Heading4 => "h4",
            BlockKind::Heading5 => "h5",
            BlockKind::Heading6 => "h6",
            BlockKind::ListItem => "li",
            BlockKind::OrderedListItem => "ol",
            BlockKind::Quote => "blockquote",
            BlockKind::Preformatted => "pre",
        }
    }

    /// Resolve a surface tag (case-insensitive) to a block kind
    pub fn from_tag(tag: &str) -> DocumentResult<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == lowered)
            .ok_or_else(|| DocumentError::unknown_type(tag))
    }

    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockKind::Heading1 => Some(1),
            BlockKind::Heading2 => Some(2),
            BlockKind::Heading3 => Some(3),
            BlockKind::Heading4 => Some(4),
            BlockKind::Heading5 => Some(5),
            BlockKind::Heading6 => Some(6),
            _ => None,
        }
    }

    pub fn is_list_item(self) -> bool {
        matches!(self, BlockKind::ListItem | BlockKind::OrderedListItem)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Inline formatting kind of a markup
///
/// Declaration order is the kind priority used to sort markups that share a
/// start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkupKind {
    Link,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
}

impl MarkupKind {
    pub fn tag(self) -> &'static str {
        match self {
            MarkupKind::Link => "a",
            MarkupKind::Bold => "strong",
            MarkupKind::Italic => "em",
            MarkupKind::Underline => "u",
            MarkupKind::Strikethrough => "s",
            MarkupKind::Code => "code",
        }
    }

    /// Resolve an inline surface tag, accepting the common aliases
    pub fn from_tag(tag: &str) -> DocumentResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(MarkupKind::Link),
            "strong" | "b" => Ok(MarkupKind::Bold),
            "em" | "i" => Ok(MarkupKind::Italic),
            "u" => Ok(MarkupKind::Underline),
            "s" | "del" | "strike" => Ok(MarkupKind::Strikethrough),
            "code" => Ok(MarkupKind::Code),
            _ => Err(DocumentError::unknown_type(tag)),
        }
    }
}

impl fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tags_resolve_back() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::from_tag(kind.tag()), Ok(kind));
        }
        assert_eq!(BlockKind::from_tag("H2"), Ok(BlockKind::Heading2));
    }

    #[test]
    fn test_unknown_block_tag() {
        assert_eq!(
            BlockKind::from_tag("marquee"),
            Err(DocumentError::UnknownType("marquee".to_string()))
        );
    }

    #[test]
    fn test_markup_aliases() {
        assert_eq!(MarkupKind::from_tag("b"), Ok(MarkupKind::Bold));
        assert_eq!(MarkupKind::from_tag("I"), Ok(MarkupKind::Italic));
        assert_eq!(MarkupKind::from_tag("del"), Ok(MarkupKind::Strikethrough));
        assert!(MarkupKind::from_tag("blink").is_err());
    }

    #[test]
    fn test_markup_priority_order() {
        assert!(MarkupKind::Link < MarkupKind::Bold);
        assert!(MarkupKind::Bold < MarkupKind::Code);
    }
}
