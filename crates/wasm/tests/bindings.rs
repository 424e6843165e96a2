#![cfg(target_arch = "wasm32")]

use linkfmt_wasm::{
    check_accessibility, check_accessibility_with_options, get_character_count, get_plain_text,
    markdown_diagnostics, markdown_to_linkedin, markdown_to_linkedin_with_options,
};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CharacterCount {
    total: usize,
    unicode: usize,
    remaining: i64,
    exceeds_limit: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Accessibility {
    has_unicode_formatting: bool,
    unicode_char_count: usize,
    plain_text_length: usize,
    unicode_percentage: f64,
    warnings: Vec<String>,
}

fn options(json: &[(&str, JsValue)]) -> JsValue {
    let object = js_sys::Object::new();
    for (key, value) in json {
        js_sys::Reflect::set(&object, &JsValue::from_str(key), value).expect("set property");
    }
    object.into()
}

#[wasm_bindgen_test]
fn formats_and_strips() {
    let rendered = markdown_to_linkedin("**Hi** there");
    assert_eq!(rendered, "\u{1D407}\u{1D422} there");
    assert_eq!(get_plain_text(&rendered), "Hi there");
}

#[wasm_bindgen_test]
fn options_use_camel_case_keys() {
    let opts = options(&[
        ("bullet", JsValue::from_str("→")),
        ("linkUrls", JsValue::FALSE),
    ]);
    let rendered = markdown_to_linkedin_with_options("- [a](https://x.io)", opts)
        .expect("valid options");
    assert_eq!(rendered, "→ a");

    let defaults = markdown_to_linkedin_with_options("- a", JsValue::UNDEFINED).expect("defaults");
    assert_eq!(defaults, "• a");
}

#[wasm_bindgen_test]
fn invalid_options_are_errors() {
    let opts = options(&[("bullet", JsValue::from_str("x"))]);
    assert!(markdown_to_linkedin_with_options("- a", opts).is_err());

    let opts = options(&[("platformLimit", JsValue::from_f64(0.0))]);
    assert!(check_accessibility_with_options("a", opts).is_err());
}

#[wasm_bindgen_test]
fn character_count_report() {
    let value = get_character_count("\u{1D400}b").expect("serializable");
    let count: CharacterCount = serde_wasm_bindgen::from_value(value).expect("deserialize");
    assert_eq!(count.total, 2);
    assert_eq!(count.unicode, 1);
    assert_eq!(count.remaining, 2998);
    assert!(!count.exceeds_limit);
}

#[wasm_bindgen_test]
fn accessibility_reports() {
    let value = check_accessibility("").expect("serializable");
    let report: Accessibility = serde_wasm_bindgen::from_value(value).expect("deserialize");
    assert!(!report.has_unicode_formatting);
    assert_eq!(report.unicode_char_count, 0);
    assert_eq!(report.plain_text_length, 0);
    assert_eq!(report.unicode_percentage, 0.0);
    assert!(report.warnings.is_empty());

    let opts = options(&[("platformLimit", JsValue::from_f64(3.0))]);
    let value = check_accessibility_with_options("abcd", opts).expect("valid options");
    let report: Accessibility = serde_wasm_bindgen::from_value(value).expect("deserialize");
    assert_eq!(report.warnings.len(), 1);
}

#[wasm_bindgen_test]
fn diagnostics_are_messages() {
    let messages = markdown_diagnostics("```\ncode");
    assert_eq!(messages.length(), 1);
    let first = messages.get(0).as_string().expect("string message");
    assert!(first.starts_with("1:1: code fence"));
    assert_eq!(markdown_diagnostics("plain").length(), 0);
}
