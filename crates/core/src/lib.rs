#![deny(missing_docs)]
//! Linkfmt core: markdown to LinkedIn-ready Unicode text, plain-text
//! recovery, and post length and accessibility analysis.

/// Post length and screen-reader reports.
pub mod analyze;
/// Block tokenizer.
pub mod block;
/// Code fence detection utilities.
pub mod code_fence;
/// Code-point counting and classification.
pub mod codepoint;
/// Core error and diagnostic types.
pub mod error;
/// Plain-text extraction from formatted output.
pub mod extract;
/// Inline span parser.
pub mod inline;
/// Rendering and analysis options.
pub mod options;
/// Token tree renderer.
pub mod render;
/// Mathematical alphanumeric style tables.
pub mod style;
/// Token types shared by the tokenizer and renderer.
pub mod token;

pub use analyze::{
    AccessibilityReport, CharacterCountReport, check_accessibility,
    check_accessibility_with_options, get_character_count, get_character_count_with_options,
};
pub use block::{tokenize, tokenize_with_diagnostics};
pub use code_fence::{FencePhase, FenceState, LineParseOutcome, advance_fence_state};
pub use error::{OptionsError, ParseDiagnostics, ParseWarning, SourceLocation};
pub use extract::get_plain_text;
pub use inline::parse_inlines;
pub use options::{AnalysisOptions, FormatOptions};
pub use render::{markdown_to_linkedin, markdown_to_linkedin_with_options, render};
pub use style::{MappingTable, StyleVariant, mapping_table, style_char, style_text};
pub use token::{InlineSpan, ListMarker, Token};
