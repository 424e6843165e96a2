//! Length and accessibility reports for formatted text.

use crate::codepoint::{code_points, count, is_ascii_alnum, is_basic_ascii};
use crate::extract::get_plain_text;
use crate::options::AnalysisOptions;
use crate::style::mapping_table;
use serde::Serialize;

/// Length of a post measured against the platform limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCountReport {
    /// Code points in the text.
    pub total: usize,
    /// Code points above U+007F.
    pub unicode: usize,
    /// Code points left before the limit, negative when over.
    pub remaining: i64,
    /// True when `total` is over the limit.
    pub exceeds_limit: bool,
}

/// Advisory report on how screen readers will cope with the text.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    /// Any code point above U+007F present.
    pub has_unicode_formatting: bool,
    /// Code points above U+007F.
    pub unicode_char_count: usize,
    /// Code points left after stripping styling.
    pub plain_text_length: usize,
    /// Share of non-ASCII code points, 0 to 100.
    pub unicode_percentage: f64,
    /// Human-readable advisories, in a fixed order.
    pub warnings: Vec<String>,
}

/// Counts code points against the default 3000 limit.
pub fn get_character_count(text: &str) -> CharacterCountReport {
    get_character_count_with_options(text, &AnalysisOptions::default())
}

/// Counts code points against `options.platform_limit`.
pub fn get_character_count_with_options(
    text: &str,
    options: &AnalysisOptions,
) -> CharacterCountReport {
    let mut total = 0usize;
    let mut unicode = 0usize;
    for c in code_points(text) {
        total += 1;
        if !is_basic_ascii(c) {
            unicode += 1;
        }
    }
    CharacterCountReport {
        total,
        unicode,
        remaining: options.platform_limit as i64 - total as i64,
        exceeds_limit: total > options.platform_limit,
    }
}

/// Accessibility report with the default thresholds.
pub fn check_accessibility(text: &str) -> AccessibilityReport {
    check_accessibility_with_options(text, &AnalysisOptions::default())
}

/// Accessibility report with caller-supplied thresholds.
pub fn check_accessibility_with_options(
    text: &str,
    options: &AnalysisOptions,
) -> AccessibilityReport {
    if text.is_empty() {
        return AccessibilityReport::default();
    }

    let counts = get_character_count_with_options(text, options);
    let unicode_percentage = counts.unicode as f64 * 100.0 / counts.total as f64;

    let mut warnings = Vec::new();
    if unicode_percentage > options.density_threshold {
        warnings.push(format!(
            "{unicode_percentage:.1}% of characters are styled Unicode (over {}%); \
             screen readers may skip or spell them out",
            options.density_threshold
        ));
    }
    if counts.exceeds_limit {
        warnings.push(format!(
            "Text is {} characters, over the {} character limit",
            counts.total, options.platform_limit
        ));
    }
    if is_entirely_styled(text) {
        warnings.push(
            "Text is entirely styled with no plain-text fallback; \
             screen readers may not read it as words"
                .to_string(),
        );
    }

    if !warnings.is_empty() {
        log::debug!("accessibility check raised {} warnings", warnings.len());
    }

    AccessibilityReport {
        has_unicode_formatting: counts.unicode > 0,
        unicode_char_count: counts.unicode,
        plain_text_length: count(&get_plain_text(text)),
        unicode_percentage,
        warnings,
    }
}

fn is_entirely_styled(text: &str) -> bool {
    let table = mapping_table();
    let mut styled = false;
    for c in code_points(text) {
        if is_ascii_alnum(c) {
            return false;
        }
        styled |= table.is_styled(c);
    }
    styled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{StyleVariant, style_text};

    #[test]
    fn empty_text() {
        assert_eq!(
            get_character_count(""),
            CharacterCountReport {
                total: 0,
                unicode: 0,
                remaining: 3000,
                exceeds_limit: false,
            }
        );
        assert_eq!(check_accessibility(""), AccessibilityReport::default());
    }

    #[test]
    fn styled_letter_is_one_code_point() {
        let report = get_character_count("\u{1D400}");
        assert_eq!(report.total, 1);
        assert_eq!(report.unicode, 1);
        assert_eq!(report.remaining, 2999);
    }

    #[test]
    fn limit_boundary() {
        let at_limit = "a".repeat(3000);
        let report = get_character_count(&at_limit);
        assert!(!report.exceeds_limit);
        assert_eq!(report.remaining, 0);
        assert!(check_accessibility(&at_limit).warnings.is_empty());

        let over = "a".repeat(3001);
        let report = get_character_count(&over);
        assert!(report.exceeds_limit);
        assert_eq!(report.remaining, -1);
        let warnings = check_accessibility(&over).warnings;
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("3001"));
    }

    #[test]
    fn density_boundary() {
        let at_threshold = check_accessibility("ééé1234567");
        assert_eq!(at_threshold.unicode_percentage, 30.0);
        assert!(at_threshold.warnings.is_empty());

        let above = check_accessibility("éééé123456");
        assert_eq!(above.unicode_percentage, 40.0);
        assert_eq!(above.warnings.len(), 1);
        assert!(above.warnings[0].starts_with("40.0%"));
    }

    #[test]
    fn fully_bold_text() {
        let bold = style_text("Hello", StyleVariant::Bold);
        let report = check_accessibility(&bold);
        assert!(report.has_unicode_formatting);
        assert_eq!(report.unicode_char_count, 5);
        assert_eq!(report.plain_text_length, 5);
        assert_eq!(report.unicode_percentage, 100.0);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[1].contains("entirely styled"));
    }

    #[test]
    fn plain_fallback_silences_styling_warning() {
        let mixed = format!("{} world", style_text("Hi", StyleVariant::Bold));
        assert!(!is_entirely_styled(&mixed));
        assert!(!is_entirely_styled("• ─ →"));
    }

    #[test]
    fn custom_options() {
        let options = AnalysisOptions {
            platform_limit: 10,
            density_threshold: 50.0,
        };
        let report = check_accessibility_with_options("éééé1234567", &options);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("over the 10 character limit"));
        assert_eq!(get_character_count_with_options("abc", &options).remaining, 7);
    }

    #[test]
    fn reports_serialize_camel_case() {
        let value = serde_json::to_value(check_accessibility("ab")).expect("serializable");
        assert_eq!(value["hasUnicodeFormatting"], false);
        assert_eq!(value["plainTextLength"], 2);
        let value = serde_json::to_value(get_character_count("ab")).expect("serializable");
        assert_eq!(value["exceedsLimit"], false);
        assert_eq!(value["remaining"], 2998);
    }
}
