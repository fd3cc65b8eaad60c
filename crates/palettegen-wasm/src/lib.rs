//! WASM bindings for the palette generator.
//!
//! Exposes `process()` to JavaScript via wasm-bindgen, so Node build
//! pipelines can run the generator over a stylesheet string.
//! Returns a JS object `{ css, declarations, created }` or throws on error.

use wasm_bindgen::prelude::*;

/// Populate the palette rule of a CSS source string.
///
/// Returns a JS object with `{ css: string, declarations: { name, value }[],
/// created: boolean }`. `declarations` lists what was written into the
/// palette rule, in output order.
/// Throws a JS error if the stylesheet cannot be parsed.
#[wasm_bindgen]
pub fn process(source: &str) -> Result<JsValue, JsError> {
    let output = palettegen_codegen::process(source, &Default::default())
        .map_err(|e| JsError::new(&e.to_string()))?;

    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"css".into(), &output.css.into())
        .map_err(|_| JsError::new("Failed to set css property"))?;
    js_sys::Reflect::set(&js_obj, &"declarations".into(), &tokens()?)
        .map_err(|_| JsError::new("Failed to set declarations property"))?;
    js_sys::Reflect::set(
        &js_obj,
        &"created".into(),
        &output.stats.created_rule.into(),
    )
    .map_err(|_| JsError::new("Failed to set created property"))?;

    Ok(js_obj.into())
}

/// The generated variables as an array of `{ name, value }`.
#[wasm_bindgen]
pub fn tokens() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&palettegen_codegen::tokens())
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Get the generator version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
