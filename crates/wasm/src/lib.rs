use js_sys::Array;
use linkfmt_core::{AnalysisOptions, FormatOptions, StyleVariant};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Config
// ============================================================================

/// Options object accepted by the `*WithOptions` functions. Every field is
/// optional; missing fields keep the core defaults.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct WasmConfig {
    #[serde(default)]
    pub bullet: Option<char>,
    #[serde(default, alias = "headingStyle")]
    pub heading_style: Option<StyleVariant>,
    #[serde(default, alias = "linkUrls")]
    pub link_urls: Option<bool>,
    #[serde(default, alias = "platformLimit")]
    pub platform_limit: Option<usize>,
    #[serde(default, alias = "densityThreshold")]
    pub density_threshold: Option<f64>,
}

fn parse_config(config: JsValue) -> Result<WasmConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(WasmConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

fn build_format_options(cfg: &WasmConfig) -> Result<FormatOptions, JsError> {
    let defaults = FormatOptions::default();
    let options = FormatOptions {
        bullet: cfg.bullet.unwrap_or(defaults.bullet),
        heading_style: cfg.heading_style.unwrap_or(defaults.heading_style),
        link_urls: cfg.link_urls.unwrap_or(defaults.link_urls),
    };
    options
        .validate()
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
    Ok(options)
}

fn build_analysis_options(cfg: &WasmConfig) -> Result<AnalysisOptions, JsError> {
    let defaults = AnalysisOptions::default();
    let options = AnalysisOptions {
        platform_limit: cfg.platform_limit.unwrap_or(defaults.platform_limit),
        density_threshold: cfg.density_threshold.unwrap_or(defaults.density_threshold),
    };
    options
        .validate()
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
    Ok(options)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Formatting API
// ============================================================================

/// Converts markdown into LinkedIn-ready Unicode text.
#[wasm_bindgen(js_name = markdownToLinkedIn)]
pub fn markdown_to_linkedin(markdown: &str) -> String {
    linkfmt_core::markdown_to_linkedin(markdown)
}

/// Converts markdown with a `{ bullet, headingStyle, linkUrls }` options
/// object. `undefined` or `null` means defaults.
#[wasm_bindgen(js_name = markdownToLinkedInWithOptions)]
pub fn markdown_to_linkedin_with_options(
    markdown: &str,
    options: JsValue,
) -> Result<String, JsError> {
    let cfg = parse_config(options)?;
    let options = build_format_options(&cfg)?;
    Ok(linkfmt_core::markdown_to_linkedin_with_options(
        markdown, &options,
    ))
}

/// Strips styling, strike marks, list prefixes and link URLs.
#[wasm_bindgen(js_name = getPlainText)]
pub fn get_plain_text(text: &str) -> String {
    linkfmt_core::get_plain_text(text)
}

/// Returns the parse warnings for `markdown` as an array of messages.
///
/// # Example (JavaScript)
///
/// ```javascript
/// markdownDiagnostics("```\ncode");
/// // ["1:1: code fence (`) is never closed; the rest of the text is treated as code"]
/// ```
#[wasm_bindgen(js_name = markdownDiagnostics)]
pub fn markdown_diagnostics(markdown: &str) -> Array {
    let (_, diagnostics) = linkfmt_core::tokenize_with_diagnostics(markdown);
    diagnostics
        .warnings
        .iter()
        .map(|warning| JsValue::from_str(&warning.to_string()))
        .collect()
}

// ============================================================================
// Analysis API
// ============================================================================

/// Returns `{ total, unicode, remaining, exceedsLimit }`.
#[wasm_bindgen(js_name = getCharacterCount)]
pub fn get_character_count(text: &str) -> Result<JsValue, JsError> {
    to_js(&linkfmt_core::get_character_count(text))
}

/// Returns `{ hasUnicodeFormatting, unicodeCharCount, plainTextLength,
/// unicodePercentage, warnings }`.
#[wasm_bindgen(js_name = checkAccessibility)]
pub fn check_accessibility(text: &str) -> Result<JsValue, JsError> {
    to_js(&linkfmt_core::check_accessibility(text))
}

/// Accessibility report with a `{ platformLimit, densityThreshold }` options
/// object.
#[wasm_bindgen(js_name = checkAccessibilityWithOptions)]
pub fn check_accessibility_with_options(
    text: &str,
    options: JsValue,
) -> Result<JsValue, JsError> {
    let cfg = parse_config(options)?;
    let options = build_analysis_options(&cfg)?;
    to_js(&linkfmt_core::check_accessibility_with_options(
        text, &options,
    ))
}
