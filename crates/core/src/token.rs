//! Block tokens and inline spans produced by the tokenizer.
//!
//! Trees are plain owned values built per call and dropped after rendering.

use crate::style::StyleVariant;

/// Marker in front of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `-`, `*` or `+`.
    Bullet,
    /// `<n>.`, keeping the number as written.
    Ordered(u64),
}

/// Block-level unit of a markdown document.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `#` through `######`.
    Heading {
        /// 1-6.
        level: u8,
        /// Heading text.
        spans: Vec<InlineSpan>,
    },
    /// One list item line.
    ListItem {
        /// Bullet or ordinal.
        marker: ListMarker,
        /// Nesting level from leading indentation, 0 at top level.
        depth: usize,
        /// Item text.
        spans: Vec<InlineSpan>,
    },
    /// Fenced code, captured verbatim.
    CodeBlock {
        /// Text after the opening fence, if any.
        info: Option<String>,
        /// Raw lines between the fences.
        lines: Vec<String>,
    },
    /// One or more adjacent text lines.
    Paragraph(Vec<InlineSpan>),
    /// `---`, `***` or `___`.
    Rule,
    /// Separator between blocks.
    BlankLine,
}

/// Inline content inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineSpan {
    /// Literal text.
    Text(String),
    /// `*`, `**` or `***` emphasis.
    Emphasis(StyleVariant, Vec<InlineSpan>),
    /// `~~struck~~`.
    Strikethrough(Vec<InlineSpan>),
    /// `` `code` ``, never re-scanned.
    CodeSpan(String),
    /// `[label](url)`. The label only ever holds `Text`.
    Link {
        /// Visible label.
        label: Vec<InlineSpan>,
        /// Target URL.
        url: String,
    },
}

impl InlineSpan {
    /// Convenience constructor for a text span.
    pub fn text(value: impl Into<String>) -> Self {
        InlineSpan::Text(value.into())
    }
}
