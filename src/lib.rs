pub mod dsp;
pub mod error;
pub mod event;
pub mod score;

use wasm_bindgen::prelude::*;

use crate::error::SynthError;
use crate::score::Score;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the polywave-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

fn js_err(e: SynthError) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}

/// WASM-exposed: parse and validate a JSON score, returning it as a JS
/// object (editor preview path — fails fast on notes the engine cannot
/// play).
#[wasm_bindgen]
pub fn parse_score(json: &str) -> Result<JsValue, JsValue> {
    let score = Score::from_json(json).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&score).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: render a JSON score to a WAV byte array.
#[wasm_bindgen]
pub fn render_score_wav_js(json: &str, sample_rate: u32) -> Result<Vec<u8>, JsValue> {
    let score = Score::from_json(json).map_err(js_err)?;
    dsp::renderer::render_score_wav(&score, sample_rate).map_err(js_err)
}

/// WASM-exposed: render a JSON score to mono f32 samples.
/// Returns the raw audio buffer for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_score_samples_js(json: &str, sample_rate: u32) -> Result<Vec<f32>, JsValue> {
    let score = Score::from_json(json).map_err(js_err)?;
    dsp::renderer::render_score(&score, sample_rate).map_err(js_err)
}
