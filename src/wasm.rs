//! WASM bindings for browser-side rendering.
//!
//! This module exposes JSON-to-HTML rendering to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::json::from_json;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Render a JSON document description to HTML.
///
/// Takes the description as a JSON string and returns the serialized markup,
/// optionally preceded by `<!DOCTYPE html>`.
#[wasm_bindgen]
pub fn render_json(json: &str, prepend_doctype: bool) -> Result<String, JsValue> {
    let node = from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(node.serialize(prepend_doctype))
}
