use bbmark_core::{ParamGrammar, TagRegistry, TransformOptions, Transformer};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderOptions {
    max_depth: Option<usize>,
    strict_params: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderResult {
    html: String,
    unclosed: Vec<String>,
    depth_limited: bool,
}

#[wasm_bindgen]
pub fn render_bbcode(source: &str) -> Result<JsValue, JsValue> {
    render_bbcode_with_options(source, JsValue::UNDEFINED)
}

#[wasm_bindgen]
pub fn render_bbcode_with_options(source: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let transformed = Transformer::new(options).transform(source);
    let result = RenderResult {
        html: transformed.html,
        unclosed: transformed.unclosed,
        depth_limited: transformed.depth_limited,
    };
    serde_wasm_bindgen::to_value(&result).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// `cursor` is a JS string index (UTF-16 code units).
#[wasm_bindgen]
pub fn suggest_close(source: &str, cursor: usize) -> Option<String> {
    bbmark_core::suggest_close(source, utf16_to_byte_offset(source, cursor))
}

#[wasm_bindgen]
pub fn tag_names() -> Vec<String> {
    TagRegistry::shared()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn options_from_js(value: JsValue) -> Result<TransformOptions, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(TransformOptions::default());
    }
    let parsed: RenderOptions =
        serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))?;
    Ok(merge_options(parsed))
}

fn merge_options(parsed: RenderOptions) -> TransformOptions {
    let mut out = TransformOptions::default();
    if let Some(max_depth) = parsed.max_depth {
        out.max_depth = max_depth.max(1);
    }
    if parsed.strict_params == Some(true) {
        out.param_grammar = ParamGrammar::Strict;
    }
    out
}

fn utf16_to_byte_offset(source: &str, cursor: usize) -> usize {
    let mut units = 0;
    for (offset, ch) in source.char_indices() {
        if units >= cursor {
            return offset;
        }
        units += ch.len_utf16();
    }
    source.len()
}
