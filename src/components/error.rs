use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the browser APIs the decorative effects lean on.
///
/// None of these are fatal: callers log them and fall back to a static render.
#[derive(Debug, Error)]
pub enum AnimationError {
	#[error("no global window")]
	NoWindow,
	#[error("canvas has no 2d context")]
	NoContext,
	#[error("browser rejected the call: {0}")]
	Js(String),
}

impl From<JsValue> for AnimationError {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
