//! Recovers plain text from formatted output.

use crate::codepoint::leading_indent;
use crate::options::BULLETS;
use crate::style::mapping_table;

/// Combining long and short stroke overlays.
const STRIKE_MARKS: [char; 2] = ['\u{0336}', '\u{0335}'];

/// Link targets the renderer may append, absolute or relative.
const URL_PREFIXES: [&str; 7] = ["http://", "https://", "mailto:", "www.", "/", "./", "../"];

/// Strips styling, strike marks, list prefixes and link URLs.
///
/// Every line is handled on its own, so the result for one line never
/// depends on what the rest of the text contains. Applying this to its own
/// output is a no-op.
pub fn get_plain_text(text: &str) -> String {
    let lines: Vec<String> = text.split('\n').map(plain_line).collect();
    lines.join("\n")
}

fn plain_line(line: &str) -> String {
    let table = mapping_table();
    let mut current: String = line
        .chars()
        .filter(|c| !STRIKE_MARKS.contains(c))
        .map(|c| table.to_ascii(c).unwrap_or(c))
        .collect();
    // removing one decoration can expose another
    loop {
        let next = strip_list_prefix(&strip_link_urls(&current));
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Removes every ` (<url>)` the renderer appended after a link label.
fn strip_link_urls(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(index) = rest.find(" (") {
        let target = &rest[index + 2..];
        match url_len(target) {
            Some(len) => {
                out.push_str(&rest[..index]);
                rest = &target[len + 1..];
            }
            None => {
                out.push_str(&rest[..index + 2]);
                rest = target;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte length of a URL ended by its balancing `)`.
fn url_len(target: &str) -> Option<usize> {
    if !URL_PREFIXES.iter().any(|prefix| target.starts_with(prefix)) {
        return None;
    }
    let mut depth = 0usize;
    for (index, c) in target.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(index),
            ')' => depth -= 1,
            c if c.is_whitespace() => return None,
            _ => {}
        }
    }
    None
}

/// Drops bullet and `<n>. ` prefixes, keeping the indentation.
fn strip_list_prefix(line: &str) -> String {
    let (_, offset) = leading_indent(line);
    let (indent, mut rest) = line.split_at(offset);
    while let Some(next) = strip_bullet(rest).or_else(|| strip_ordinal(rest)) {
        rest = next.trim_start_matches([' ', '\t']);
    }
    format!("{indent}{rest}")
}

fn strip_bullet(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    let first = chars.next()?;
    if !BULLETS.contains(&first) {
        return None;
    }
    chars.as_str().strip_prefix(' ')
}

fn strip_ordinal(text: &str) -> Option<&str> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if !(1..=9).contains(&digits) {
        return None;
    }
    text[digits..].strip_prefix(". ")
}
