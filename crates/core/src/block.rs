//! Line-oriented block tokenizer.
//!
//! Each line is first offered to the fence tracker. Outside a fence it is
//! classified in priority order: heading, thematic break, ordered item,
//! unordered item, blank, paragraph text. Adjacent text lines merge into one
//! paragraph so inline markers can pair across them.

use crate::code_fence::{FenceLine, FenceState, advance_fence_state};
use crate::codepoint::leading_indent;
use crate::error::{ParseDiagnostics, ParseWarning, SourceLocation};
use crate::inline::parse_inlines_at;
use crate::token::{ListMarker, Token};

/// Splits markdown into block tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    tokenize_with_diagnostics(input).0
}

/// Splits markdown into block tokens, collecting non-fatal warnings.
pub fn tokenize_with_diagnostics(input: &str) -> (Vec<Token>, ParseDiagnostics) {
    let mut tokenizer = Tokenizer::default();
    for (index, line) in input.lines().enumerate() {
        tokenizer.line(index + 1, line);
    }
    tokenizer.finish()
}

/// Classified non-fence line.
#[derive(Debug, PartialEq)]
enum BlockLine<'a> {
    Blank,
    Heading {
        level: u8,
        text: &'a str,
        column: usize,
    },
    Rule,
    Item {
        marker: ListMarker,
        depth: usize,
        text: &'a str,
        column: usize,
    },
    Text {
        text: &'a str,
        column: usize,
    },
}

struct OpenFence {
    info: String,
    lines: Vec<String>,
    location: SourceLocation,
    marker: char,
}

impl OpenFence {
    fn into_token(self) -> Token {
        Token::CodeBlock {
            info: (!self.info.is_empty()).then_some(self.info),
            lines: self.lines,
        }
    }
}

struct PendingParagraph {
    origin: SourceLocation,
    text: String,
    indents: Vec<usize>,
}

#[derive(Default)]
struct Tokenizer {
    tokens: Vec<Token>,
    diagnostics: ParseDiagnostics,
    fence_state: FenceState,
    fence: Option<OpenFence>,
    paragraph: Option<PendingParagraph>,
}

impl Tokenizer {
    fn line(&mut self, number: usize, raw: &str) {
        let outcome = advance_fence_state(raw, self.fence_state);
        let marker = outcome.next_state.marker;
        self.fence_state = outcome.next_state;

        match outcome.line {
            FenceLine::Open(info) => {
                self.flush_paragraph();
                let (_, offset) = leading_indent(raw);
                self.fence = Some(OpenFence {
                    info,
                    lines: Vec::new(),
                    location: SourceLocation::new(number, raw[..offset].chars().count() + 1),
                    marker: marker.unwrap_or('`'),
                });
                return;
            }
            FenceLine::Content => {
                if let Some(fence) = self.fence.as_mut() {
                    fence.lines.push(raw.to_string());
                }
                return;
            }
            FenceLine::Close => {
                if let Some(fence) = self.fence.take() {
                    self.tokens.push(fence.into_token());
                }
                return;
            }
            FenceLine::Outside => {}
        }

        match classify(raw) {
            BlockLine::Text { text, column } => match self.paragraph.as_mut() {
                Some(paragraph) => {
                    paragraph.text.push('\n');
                    paragraph.text.push_str(text);
                    paragraph.indents.push(column);
                }
                None => {
                    self.paragraph = Some(PendingParagraph {
                        origin: SourceLocation::new(number, column + 1),
                        text: text.to_string(),
                        indents: Vec::new(),
                    });
                }
            },
            BlockLine::Blank => {
                self.flush_paragraph();
                self.tokens.push(Token::BlankLine);
            }
            BlockLine::Heading {
                level,
                text,
                column,
            } => {
                self.flush_paragraph();
                let spans = parse_inlines_at(
                    text,
                    SourceLocation::new(number, column + 1),
                    &[],
                    &mut self.diagnostics,
                );
                self.tokens.push(Token::Heading { level, spans });
            }
            BlockLine::Rule => {
                self.flush_paragraph();
                self.tokens.push(Token::Rule);
            }
            BlockLine::Item {
                marker,
                depth,
                text,
                column,
            } => {
                self.flush_paragraph();
                let spans = parse_inlines_at(
                    text,
                    SourceLocation::new(number, column + 1),
                    &[],
                    &mut self.diagnostics,
                );
                self.tokens.push(Token::ListItem {
                    marker,
                    depth,
                    spans,
                });
            }
        }
    }

    fn flush_paragraph(&mut self) {
        if let Some(paragraph) = self.paragraph.take() {
            let spans = parse_inlines_at(
                &paragraph.text,
                paragraph.origin,
                &paragraph.indents,
                &mut self.diagnostics,
            );
            self.tokens.push(Token::Paragraph(spans));
        }
    }

    fn finish(mut self) -> (Vec<Token>, ParseDiagnostics) {
        if let Some(fence) = self.fence.take() {
            self.diagnostics.add_warning(ParseWarning::UnclosedCodeFence {
                location: fence.location,
                marker: fence.marker,
            });
            self.tokens.push(fence.into_token());
        }
        self.flush_paragraph();
        self.diagnostics.sort();
        log::trace!("tokenized {} block tokens", self.tokens.len());
        (self.tokens, self.diagnostics)
    }
}

fn classify(raw: &str) -> BlockLine<'_> {
    let (indent, offset) = leading_indent(raw);
    let rest = raw[offset..].trim_end();
    if rest.is_empty() {
        return BlockLine::Blank;
    }
    let column_at = |start: usize| raw[..offset + start].chars().count();

    if indent <= 3 {
        if let Some((level, start, text)) = heading(rest) {
            return BlockLine::Heading {
                level,
                text,
                column: column_at(start),
            };
        }
        if is_rule(rest) {
            return BlockLine::Rule;
        }
    }

    if let Some((marker, start, text)) = list_item(rest) {
        return BlockLine::Item {
            marker,
            depth: indent / 2,
            text,
            column: column_at(start),
        };
    }

    BlockLine::Text {
        text: rest,
        column: column_at(0),
    }
}

/// `#`-run of 1 to 6 followed by a space or tab. The optional closing `#`
/// sequence is dropped. A heading with no text stays literal. Returns the
/// level, the byte offset of the text and the text.
fn heading(rest: &str) -> Option<(u8, usize, &str)> {
    let level = rest.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let after = &rest[level..];
    if !after.starts_with([' ', '\t']) {
        return None;
    }
    let start = level + (after.len() - after.trim_start().len());
    let text = after.trim();
    let without_closing = text.trim_end_matches('#');
    let text = if without_closing.is_empty() {
        without_closing
    } else if without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end()
    } else {
        text
    };
    if text.is_empty() {
        return None;
    }
    Some((level as u8, start, text))
}

/// Three or more of the same `-`, `*` or `_`, optionally spaced.
fn is_rule(rest: &str) -> bool {
    let mut marks = rest.chars().filter(|c| !matches!(c, ' ' | '\t'));
    let Some(first) = marks.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in marks {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

/// Marker, byte offset of the item text, and the text.
fn list_item(rest: &str) -> Option<(ListMarker, usize, &str)> {
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if (1..=9).contains(&digits) {
        let (start, body) = item_body(&rest[digits..], '.')?;
        let ordinal = rest[..digits].parse().ok()?;
        return Some((ListMarker::Ordered(ordinal), digits + start, body));
    }
    let first = rest.chars().next()?;
    if matches!(first, '-' | '*' | '+') {
        return item_body(rest, first).map(|(start, body)| (ListMarker::Bullet, start, body));
    }
    None
}

/// Text after `marker` when it is followed by whitespace or ends the line.
fn item_body(after: &str, marker: char) -> Option<(usize, &str)> {
    let body = after.strip_prefix(marker)?;
    if body.is_empty() {
        return Some((marker.len_utf8(), body));
    }
    if body.starts_with([' ', '\t']) {
        let trimmed = body.trim_start();
        return Some((after.len() - trimmed.len(), trimmed));
    }
    None
}
