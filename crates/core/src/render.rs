//! Token tree to LinkedIn-ready text.
//!
//! Emphasis becomes substituted code points, lists get bullet glyphs and
//! code is set in Monospace. The result is plain Unicode that survives
//! pasting into a LinkedIn post box.

use crate::block::tokenize;
use crate::options::FormatOptions;
use crate::style::{MappingTable, StyleVariant, mapping_table};
use crate::token::{InlineSpan, ListMarker, Token};

/// Combining long stroke overlay appended after struck characters.
pub const STRIKE_MARK: char = '\u{0336}';

/// Horizontal rule replacement.
pub const RULE: &str = "──────────";

/// Converts markdown to LinkedIn text with default options.
pub fn markdown_to_linkedin(markdown: &str) -> String {
    markdown_to_linkedin_with_options(markdown, &FormatOptions::default())
}

/// Converts markdown to LinkedIn text.
pub fn markdown_to_linkedin_with_options(markdown: &str, options: &FormatOptions) -> String {
    let tokens = tokenize(markdown);
    render(&tokens, options)
}

/// Renders already tokenized blocks.
pub fn render(tokens: &[Token], options: &FormatOptions) -> String {
    Renderer::new(options).render(tokens)
}

struct Renderer<'a> {
    options: &'a FormatOptions,
    table: &'static MappingTable,
}

impl<'a> Renderer<'a> {
    fn new(options: &'a FormatOptions) -> Self {
        Self {
            options,
            table: mapping_table(),
        }
    }

    fn render(&self, tokens: &[Token]) -> String {
        let mut output = String::new();
        let mut previous: Option<&Token> = None;
        let mut blank_between = false;

        for token in tokens {
            if matches!(token, Token::BlankLine) {
                blank_between = true;
                continue;
            }
            let block = self.block(token);
            if block.is_empty() {
                continue;
            }
            if let Some(previous) = previous {
                output.push_str(separator(previous, token, blank_between));
            }
            output.push_str(&block);
            previous = Some(token);
            blank_between = false;
        }

        output
    }

    fn block(&self, token: &Token) -> String {
        let mut out = String::new();
        match token {
            Token::Heading { spans, .. } => {
                self.spans(spans, self.options.heading_style, &mut out);
            }
            Token::ListItem {
                marker,
                depth,
                spans,
            } => {
                out.push_str(&"  ".repeat(*depth));
                match marker {
                    ListMarker::Bullet => out.push(self.options.bullet),
                    ListMarker::Ordered(ordinal) => {
                        out.push_str(&ordinal.to_string());
                        out.push('.');
                    }
                }
                out.push(' ');
                self.spans(spans, StyleVariant::Plain, &mut out);
            }
            Token::CodeBlock { lines, .. } => {
                for (index, line) in lines.iter().enumerate() {
                    if index > 0 {
                        out.push('\n');
                    }
                    self.styled(line, StyleVariant::Monospace, &mut out);
                }
            }
            Token::Paragraph(spans) => self.spans(spans, StyleVariant::Plain, &mut out),
            Token::Rule => out.push_str(RULE),
            Token::BlankLine => {}
        }
        out
    }

    fn spans(&self, spans: &[InlineSpan], style: StyleVariant, out: &mut String) {
        for span in spans {
            match span {
                InlineSpan::Text(text) => self.styled(text, style, out),
                // innermost variant wins
                InlineSpan::Emphasis(variant, children) => self.spans(children, *variant, out),
                InlineSpan::Strikethrough(children) => {
                    let mut struck = String::new();
                    self.spans(children, style, &mut struck);
                    strike(&struck, out);
                }
                InlineSpan::CodeSpan(code) => self.styled(code, StyleVariant::Monospace, out),
                InlineSpan::Link { label, url } => {
                    let label_start = out.len();
                    self.spans(label, style, out);
                    if self.options.link_urls && !url.is_empty() {
                        if out.len() > label_start {
                            out.push(' ');
                        }
                        out.push('(');
                        out.push_str(url);
                        out.push(')');
                    }
                }
            }
        }
    }

    fn styled(&self, text: &str, style: StyleVariant, out: &mut String) {
        out.extend(text.chars().map(|c| self.table.apply(style, c)));
    }
}

/// Existing overlays are dropped so every character carries exactly one.
fn strike(text: &str, out: &mut String) {
    for c in text.chars() {
        if matches!(c, STRIKE_MARK | '\u{0335}') {
            continue;
        }
        out.push(c);
        if c != '\n' {
            out.push(STRIKE_MARK);
        }
    }
}

/// Adjacent list items stay on consecutive lines unless they are top-level
/// items of different kinds. Everything else gets one blank line.
fn separator(previous: &Token, next: &Token, blank_between: bool) -> &'static str {
    match (previous, next) {
        (
            Token::ListItem {
                marker: first,
                depth: first_depth,
                ..
            },
            Token::ListItem {
                marker: second,
                depth: second_depth,
                ..
            },
        ) if !blank_between => {
            let same_kind = matches!(
                (first, second),
                (ListMarker::Bullet, ListMarker::Bullet)
                    | (ListMarker::Ordered(_), ListMarker::Ordered(_))
            );
            if *first_depth > 0 || *second_depth > 0 || same_kind {
                "\n"
            } else {
                "\n\n"
            }
        }
        _ => "\n\n",
    }
}
