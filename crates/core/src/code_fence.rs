//! Code fence tracking for the block tokenizer.
//!
//! The tokenizer feeds every line through [`advance_fence_state`]; while the
//! state is [`FencePhase::InCodeFence`] lines are captured verbatim and never
//! scanned for markup.

use crate::codepoint::leading_indent;

/// Tokenizer mode carried across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FencePhase {
    /// Ordinary markdown lines.
    #[default]
    Normal,
    /// Between an opening fence and its closer.
    InCodeFence,
}

/// Current fence state (phase, marker and opening run length).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenceState {
    /// Current fence phase.
    pub phase: FencePhase,
    /// Fence marker character (`` ` `` or `~`).
    pub marker: Option<char>,
    /// Length of the opening fence run.
    pub length: usize,
}

/// What a single line means for fencing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenceLine {
    /// Ordinary line outside any fence.
    Outside,
    /// Opening fence, with its info string (possibly empty).
    Open(String),
    /// Verbatim line inside a fence.
    Content,
    /// Closing fence.
    Close,
}

/// Outcome of processing a single line for fence state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineParseOutcome {
    /// State to carry into the next line.
    pub next_state: FenceState,
    /// Classification of the line just read.
    pub line: FenceLine,
}

/// Advance fence state based on a single line of text.
pub fn advance_fence_state(line: &str, state: FenceState) -> LineParseOutcome {
    let (indent, byte_offset) = leading_indent(line);
    let after_indent = &line[byte_offset..];

    match state.phase {
        FencePhase::Normal => {
            // 4+ columns of indentation is not a fence opener
            if indent <= 3 {
                if let Some((marker, length)) = fence_run(after_indent) {
                    let info = after_indent[length..].trim();
                    // a backtick fence's info string cannot itself hold backticks
                    if !(marker == '`' && info.contains('`')) {
                        return LineParseOutcome {
                            next_state: FenceState {
                                phase: FencePhase::InCodeFence,
                                marker: Some(marker),
                                length,
                            },
                            line: FenceLine::Open(info.to_string()),
                        };
                    }
                }
            }
            LineParseOutcome {
                next_state: state,
                line: FenceLine::Outside,
            }
        }
        FencePhase::InCodeFence => {
            if indent <= 3 && closes(after_indent, state) {
                return LineParseOutcome {
                    next_state: FenceState::default(),
                    line: FenceLine::Close,
                };
            }
            LineParseOutcome {
                next_state: state,
                line: FenceLine::Content,
            }
        }
    }
}

/// Marker and run length if the text starts with 3+ backticks or tildes.
fn fence_run(after_indent: &str) -> Option<(char, usize)> {
    let first = after_indent.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    // markers are ASCII, so the run length is also its byte length
    let length = after_indent.chars().take_while(|c| *c == first).count();
    (length >= 3).then_some((first, length))
}

/// A closer is a run of the opening marker, at least as long, and nothing
/// but whitespace after it.
fn closes(after_indent: &str, state: FenceState) -> bool {
    match fence_run(after_indent) {
        Some((marker, length)) => {
            Some(marker) == state.marker
                && length >= state.length
                && after_indent[length..].trim().is_empty()
        }
        None => false,
    }
}
