//! Code-point level helpers.
//!
//! Everything in this crate counts and maps Unicode scalar values. Styled
//! letters live above the Basic Multilingual Plane (four UTF-8 bytes, two
//! UTF-16 units each), so counting storage units would double them.

/// Iterates `text` by Unicode scalar value.
pub fn code_points(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
}

/// Number of Unicode scalar values in `text`.
pub fn count(text: &str) -> usize {
    text.chars().count()
}

/// Returns true for `[A-Za-z0-9]`.
pub fn is_ascii_alnum(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Returns true for U+0000..=U+007F.
pub fn is_basic_ascii(c: char) -> bool {
    c.is_ascii()
}

/// Position of an ASCII letter or digit in the 62-entry table order
/// (`A-Z`, then `a-z`, then `0-9`).
pub(crate) fn alnum_slot(c: char) -> Option<usize> {
    match c {
        'A'..='Z' => Some(c as usize - 'A' as usize),
        'a'..='z' => Some(26 + c as usize - 'a' as usize),
        '0'..='9' => Some(52 + c as usize - '0' as usize),
        _ => None,
    }
}

/// Inverse of [`alnum_slot`].
pub(crate) fn slot_char(slot: usize) -> Option<char> {
    let (base, offset) = match slot {
        0..=25 => (b'A', slot),
        26..=51 => (b'a', slot - 26),
        52..=61 => (b'0', slot - 52),
        _ => return None,
    };
    Some((base + offset as u8) as char)
}

/// Visual indentation of a line, expanding tabs to 4-column stops.
///
/// Returns `(columns, byte_offset)`.
pub(crate) fn leading_indent(line: &str) -> (usize, usize) {
    let mut col = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => {
                col += 1;
                bytes += 1;
            }
            b'\t' => {
                col += 4 - (col % 4);
                bytes += 1;
            }
            _ => break,
        }
    }
    (col, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_letter_is_one_code_point() {
        let bold_b = "\u{1D41B}";
        assert_eq!(bold_b.len(), 4);
        assert_eq!(bold_b.encode_utf16().count(), 2);
        assert_eq!(count(bold_b), 1);
    }

    #[test]
    fn counts_mixed_text() {
        // "𝐇𝐢 👋 there"
        let text = "\u{1D407}\u{1D422} \u{1F44B} there";
        assert_eq!(count(text), 10);
        assert_eq!(code_points(text).filter(|c| !is_basic_ascii(*c)).count(), 3);
    }

    #[test]
    fn empty_text_has_no_code_points() {
        assert_eq!(count(""), 0);
        assert_eq!(code_points("").next(), None);
    }

    #[test]
    fn classifies_ascii_alnum() {
        assert!(is_ascii_alnum('a'));
        assert!(is_ascii_alnum('Z'));
        assert!(is_ascii_alnum('7'));
        assert!(!is_ascii_alnum('_'));
        assert!(!is_ascii_alnum('é'));
        assert!(!is_ascii_alnum('\u{1D400}'));
    }

    #[test]
    fn slots_cover_all_62_characters() {
        for slot in 0..62 {
            let c = slot_char(slot).expect("slot in range");
            assert_eq!(alnum_slot(c), Some(slot));
        }
        assert_eq!(slot_char(62), None);
        assert_eq!(alnum_slot('-'), None);
    }

    #[test]
    fn tab_expands_to_next_stop() {
        assert_eq!(leading_indent("  \tx"), (4, 3));
        assert_eq!(leading_indent("x"), (0, 0));
        assert_eq!(leading_indent("    - a"), (4, 4));
    }
}
