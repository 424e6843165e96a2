//! Inline span parsing.
//!
//! Markers are matched leftmost first with precedence `***` > `**` > `*` >
//! `~~` > code span > link. An opener must be followed by non-whitespace
//! and a closer preceded by non-whitespace. Anything that does not pair up
//! stays literal text.

use crate::error::{ParseDiagnostics, ParseWarning, SourceLocation};
use crate::style::StyleVariant;
use crate::token::InlineSpan;

/// Parses one block's text into inline spans.
pub fn parse_inlines(text: &str) -> Vec<InlineSpan> {
    let mut diagnostics = ParseDiagnostics::new();
    parse_inlines_at(text, SourceLocation::new(1, 1), &[], &mut diagnostics)
}

/// Parses `text` whose first character sits at `origin`. `indents` holds the
/// column offset of every further line, for multi-line paragraphs.
pub(crate) fn parse_inlines_at(
    text: &str,
    origin: SourceLocation,
    indents: &[usize],
    diagnostics: &mut ParseDiagnostics,
) -> Vec<InlineSpan> {
    let chars: Vec<char> = text.chars().collect();
    let mut parser = InlineParser {
        chars: &chars,
        origin,
        indents,
        diagnostics,
    };
    parser.parse_range(0, chars.len())
}

struct InlineParser<'a> {
    chars: &'a [char],
    origin: SourceLocation,
    indents: &'a [usize],
    diagnostics: &'a mut ParseDiagnostics,
}

impl InlineParser<'_> {
    fn parse_range(&mut self, start: usize, end: usize) -> Vec<InlineSpan> {
        let mut spans = Vec::new();
        let mut text = String::new();
        let mut i = start;

        while i < end {
            let c = self.chars[i];
            match c {
                '\\' if i + 1 < end && self.chars[i + 1].is_ascii_punctuation() => {
                    text.push(self.chars[i + 1]);
                    i += 2;
                }
                '*' => {
                    let run = self.run_len(i, end, '*');
                    if let Some((literal, span, next)) = self.emphasis(i, run, end) {
                        text.push_str(&"*".repeat(literal));
                        flush(&mut text, &mut spans);
                        spans.push(span);
                        i = next;
                    } else {
                        if self.opens(i + run, end) {
                            self.unpaired(i, "*".repeat(run.min(3)));
                        }
                        text.push_str(&"*".repeat(run));
                        i += run;
                    }
                }
                '~' if self.run_len(i, end, '~') >= 2 => {
                    let run = self.run_len(i, end, '~');
                    if let Some((span, next)) = self.strikethrough(i + run, end) {
                        text.push_str(&"~".repeat(run - 2));
                        flush(&mut text, &mut spans);
                        spans.push(span);
                        i = next;
                    } else {
                        if self.opens(i + run, end) {
                            self.unpaired(i, "~~".to_string());
                        }
                        text.push_str(&"~".repeat(run));
                        i += run;
                    }
                }
                '`' => {
                    let run = self.run_len(i, end, '`');
                    if let Some(close) = self.code_span_close(i + run, end, run) {
                        flush(&mut text, &mut spans);
                        spans.push(InlineSpan::CodeSpan(code_content(
                            &self.chars[i + run..close],
                        )));
                        i = close + run;
                    } else {
                        self.unpaired(i, "`".repeat(run));
                        text.push_str(&"`".repeat(run));
                        i += run;
                    }
                }
                '[' => {
                    if let Some((span, next)) = self.link(i, end) {
                        flush(&mut text, &mut spans);
                        spans.push(span);
                        i = next;
                    } else {
                        text.push('[');
                        i += 1;
                    }
                }
                _ => {
                    text.push(c);
                    i += 1;
                }
            }
        }

        flush(&mut text, &mut spans);
        spans
    }

    /// Tries `***`, then `**`, then `*`, using the tail of the asterisk run
    /// starting at `start`. Returns the number of leading asterisks left as
    /// text, the span, and the index after the closer.
    fn emphasis(
        &mut self,
        start: usize,
        run: usize,
        end: usize,
    ) -> Option<(usize, InlineSpan, usize)> {
        let content_start = start + run;
        if !self.opens(content_start, end) {
            return None;
        }
        for n in [3, 2, 1] {
            if n > run {
                continue;
            }
            if let Some(close) = self.emphasis_closer(content_start, end, n) {
                let variant = match n {
                    3 => StyleVariant::BoldItalic,
                    2 => StyleVariant::Bold,
                    _ => StyleVariant::Italic,
                };
                let inner = self.parse_range(content_start, close);
                return Some((run - n, InlineSpan::Emphasis(variant, inner), close + n));
            }
        }
        None
    }

    /// A closer is a run of exactly `n` asterisks, or a run of three or more
    /// whose last `n` close. The extra asterisks stay inside for a nested
    /// span to use.
    ///
    /// Each unpaired opener scans to the end of its block, so a block made of
    /// nothing but openers is quadratic in its length. Blocks are bounded by
    /// the post length in practice.
    fn emphasis_closer(&self, from: usize, end: usize, n: usize) -> Option<usize> {
        let mut j = from;
        while j < end {
            match self.chars[j] {
                '\\' => j += 2,
                '`' => j = self.skip_code_span(j, end),
                '*' => {
                    let run = self.run_len(j, end, '*');
                    if j > from && !self.chars[j - 1].is_whitespace() && (run == n || run >= 3) {
                        return Some(j + run - n);
                    }
                    j += run;
                }
                _ => j += 1,
            }
        }
        None
    }

    // same worst case as `emphasis_closer`
    fn strikethrough(&mut self, content_start: usize, end: usize) -> Option<(InlineSpan, usize)> {
        if !self.opens(content_start, end) {
            return None;
        }
        let mut j = content_start;
        while j < end {
            match self.chars[j] {
                '\\' => j += 2,
                '`' => j = self.skip_code_span(j, end),
                '~' => {
                    let run = self.run_len(j, end, '~');
                    if run >= 2 && j > content_start && !self.chars[j - 1].is_whitespace() {
                        let close = j + run - 2;
                        let inner = self.parse_range(content_start, close);
                        return Some((InlineSpan::Strikethrough(inner), close + 2));
                    }
                    j += run;
                }
                _ => j += 1,
            }
        }
        None
    }

    /// Start of the next backtick run of exactly `len`.
    fn code_span_close(&self, from: usize, end: usize, len: usize) -> Option<usize> {
        let mut j = from;
        while j < end {
            if self.chars[j] == '`' {
                let run = self.run_len(j, end, '`');
                if run == len {
                    return Some(j);
                }
                j += run;
            } else {
                j += 1;
            }
        }
        None
    }

    /// Index after the code span starting at `start`, or after its opening
    /// run when it never closes.
    fn skip_code_span(&self, start: usize, end: usize) -> usize {
        let run = self.run_len(start, end, '`');
        match self.code_span_close(start + run, end, run) {
            Some(close) => close + run,
            None => start + run,
        }
    }

    fn link(&self, start: usize, end: usize) -> Option<(InlineSpan, usize)> {
        let label_end = self.balanced(start, end, '[', ']')?;
        if label_end + 1 >= end || self.chars[label_end + 1] != '(' {
            return None;
        }
        let target_end = self.balanced(label_end + 1, end, '(', ')')?;

        let target: String = self.chars[label_end + 2..target_end].iter().collect();
        // `(url "title")`: the title is dropped
        let url = target.split_whitespace().next()?;
        let url = url
            .strip_prefix('<')
            .and_then(|u| u.strip_suffix('>'))
            .unwrap_or(url);
        if url.is_empty() {
            return None;
        }

        let label = unescape(&self.chars[start + 1..label_end]);
        let label = if label.is_empty() {
            Vec::new()
        } else {
            vec![InlineSpan::Text(label)]
        };
        Some((
            InlineSpan::Link {
                label,
                url: url.to_string(),
            },
            target_end + 1,
        ))
    }

    /// Index of the bracket closing the one at `start`.
    fn balanced(&self, start: usize, end: usize, open: char, close: char) -> Option<usize> {
        let mut depth = 0usize;
        let mut j = start;
        while j < end {
            let c = self.chars[j];
            if c == '\\' {
                j += 2;
                continue;
            }
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            j += 1;
        }
        None
    }

    fn run_len(&self, start: usize, end: usize, marker: char) -> usize {
        self.chars[start..end]
            .iter()
            .take_while(|c| **c == marker)
            .count()
    }

    fn opens(&self, content_start: usize, end: usize) -> bool {
        content_start < end && !self.chars[content_start].is_whitespace()
    }

    fn unpaired(&mut self, index: usize, marker: String) {
        let location = self.location(index);
        self.diagnostics
            .add_warning(ParseWarning::UnpairedMarker { location, marker });
    }

    fn location(&self, index: usize) -> SourceLocation {
        let before = &self.chars[..index];
        let newlines = before.iter().filter(|c| **c == '\n').count();
        let line_start = before
            .iter()
            .rposition(|c| *c == '\n')
            .map_or(0, |p| p + 1);
        let column = index - line_start;
        if newlines == 0 {
            SourceLocation::new(self.origin.line, self.origin.column + column)
        } else {
            let indent = self.indents.get(newlines - 1).copied().unwrap_or(0);
            SourceLocation::new(self.origin.line + newlines, indent + column + 1)
        }
    }
}

fn flush(text: &mut String, spans: &mut Vec<InlineSpan>) {
    if !text.is_empty() {
        spans.push(InlineSpan::Text(std::mem::take(text)));
    }
}

/// Code span content, with one surrounding space pair stripped.
fn code_content(chars: &[char]) -> String {
    let padded = chars.len() >= 2
        && chars[0] == ' '
        && chars[chars.len() - 1] == ' '
        && chars.iter().any(|c| *c != ' ');
    if padded {
        chars[1..chars.len() - 1].iter().collect()
    } else {
        chars.iter().collect()
    }
}

fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() && chars[i + 1].is_ascii_punctuation() {
            out.push(chars[i + 1]);
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleVariant::{Bold, BoldItalic, Italic};

    fn text(value: &str) -> InlineSpan {
        InlineSpan::text(value)
    }

    fn diagnostics_for(input: &str) -> ParseDiagnostics {
        let mut diagnostics = ParseDiagnostics::new();
        parse_inlines_at(input, SourceLocation::new(1, 1), &[], &mut diagnostics);
        diagnostics
    }

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(parse_inlines("hello world"), vec![text("hello world")]);
        assert!(parse_inlines("").is_empty());
    }

    #[test]
    fn emphasis_precedence() {
        assert_eq!(
            parse_inlines("***a*** **b** *c*"),
            vec![
                InlineSpan::Emphasis(BoldItalic, vec![text("a")]),
                text(" "),
                InlineSpan::Emphasis(Bold, vec![text("b")]),
                text(" "),
                InlineSpan::Emphasis(Italic, vec![text("c")]),
            ]
        );
    }

    #[test]
    fn italic_nested_in_bold() {
        assert_eq!(
            parse_inlines("**bold *it* more**"),
            vec![InlineSpan::Emphasis(
                Bold,
                vec![
                    text("bold "),
                    InlineSpan::Emphasis(Italic, vec![text("it")]),
                    text(" more"),
                ]
            )]
        );
    }

    #[test]
    fn shared_closing_run() {
        assert_eq!(
            parse_inlines("**bold *it***"),
            vec![InlineSpan::Emphasis(
                Bold,
                vec![text("bold "), InlineSpan::Emphasis(Italic, vec![text("it")])]
            )]
        );
        assert_eq!(
            parse_inlines("*it **bold***"),
            vec![InlineSpan::Emphasis(
                Italic,
                vec![text("it "), InlineSpan::Emphasis(Bold, vec![text("bold")])]
            )]
        );
    }

    #[test]
    fn unpaired_markers_stay_literal() {
        assert_eq!(parse_inlines("**not closed"), vec![text("**not closed")]);
        assert_eq!(parse_inlines("2 * 3 * 4"), vec![text("2 * 3 * 4")]);
        assert_eq!(parse_inlines("a ~~b"), vec![text("a ~~b")]);
        assert_eq!(parse_inlines("`open"), vec![text("`open")]);
        assert_eq!(parse_inlines("[x] (y)"), vec![text("[x] (y)")]);
    }

    #[test]
    fn long_runs_of_openers_stay_literal() {
        let stars = "*a ".repeat(1500);
        assert_eq!(parse_inlines(&stars), vec![text(&stars)]);
        assert_eq!(diagnostics_for(&stars).count(), 1500);

        let tildes = "~~a ".repeat(1000);
        assert_eq!(parse_inlines(&tildes), vec![text(&tildes)]);
    }

    #[test]
    fn leftover_asterisks_are_text() {
        assert_eq!(
            parse_inlines("***a*"),
            vec![text("**"), InlineSpan::Emphasis(Italic, vec![text("a")])]
        );
    }

    #[test]
    fn strikethrough_contains_emphasis() {
        assert_eq!(
            parse_inlines("~~old **news**~~"),
            vec![InlineSpan::Strikethrough(vec![
                text("old "),
                InlineSpan::Emphasis(Bold, vec![text("news")]),
            ])]
        );
    }

    #[test]
    fn code_span_is_verbatim() {
        assert_eq!(
            parse_inlines("run `a **b** c` now"),
            vec![
                text("run "),
                InlineSpan::CodeSpan("a **b** c".to_string()),
                text(" now"),
            ]
        );
        assert_eq!(
            parse_inlines("`` a ` b ``"),
            vec![InlineSpan::CodeSpan("a ` b".to_string())]
        );
    }

    #[test]
    fn code_span_hides_closers() {
        assert_eq!(
            parse_inlines("*a `*` b*"),
            vec![InlineSpan::Emphasis(
                Italic,
                vec![text("a "), InlineSpan::CodeSpan("*".to_string()), text(" b")]
            )]
        );
    }

    #[test]
    fn links() {
        assert_eq!(
            parse_inlines("see [the site](https://example.com \"title\")!"),
            vec![
                text("see "),
                InlineSpan::Link {
                    label: vec![text("the site")],
                    url: "https://example.com".to_string(),
                },
                text("!"),
            ]
        );
        assert_eq!(parse_inlines("[empty]()"), vec![text("[empty]()")]);
    }

    #[test]
    fn link_labels_are_not_scanned() {
        assert_eq!(
            parse_inlines("[**x**](u)"),
            vec![InlineSpan::Link {
                label: vec![text("**x**")],
                url: "u".to_string(),
            }]
        );
    }

    #[test]
    fn escapes_are_literal() {
        assert_eq!(parse_inlines(r"\*not\* italic"), vec![text("*not* italic")]);
        assert_eq!(parse_inlines(r"a\b"), vec![text(r"a\b")]);
    }

    #[test]
    fn emphasis_pairs_across_lines() {
        assert_eq!(
            parse_inlines("**one\ntwo**"),
            vec![InlineSpan::Emphasis(Bold, vec![text("one\ntwo")])]
        );
    }

    #[test]
    fn reports_unpaired_openers() {
        let diagnostics = diagnostics_for("ok **no");
        assert_eq!(diagnostics.count(), 1);
        assert_eq!(
            diagnostics.warnings[0],
            ParseWarning::UnpairedMarker {
                location: SourceLocation::new(1, 4),
                marker: "**".to_string(),
            }
        );
        assert!(!diagnostics_for("2 * 3").has_warnings());
        assert!(!diagnostics_for("**fine**").has_warnings());
    }

    #[test]
    fn locations_follow_line_indents() {
        let mut diagnostics = ParseDiagnostics::new();
        parse_inlines_at(
            "first\nsecond `x",
            SourceLocation::new(4, 3),
            &[2],
            &mut diagnostics,
        );
        assert_eq!(diagnostics.warnings[0].location(), &SourceLocation::new(5, 10));
    }
}
