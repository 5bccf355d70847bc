//! WASM bindings for slot-engine.
//!
//! Exposes date-picker conversion and the overlap test to JavaScript via
//! `wasm-bindgen`. Complex values cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::Deserialize;
use slot_engine::time::{intervals_overlap, parse_time, TimeRange};
use slot_engine::{convert_with_mode, Appointment, DisplayFormat, MergeMode};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Options passed from JavaScript
// ---------------------------------------------------------------------------

/// Optional conversion settings, e.g. `{"mode":"coalesce","format":{"date":"%Y-%m-%d"}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub mode: MergeMode,
    pub format: DisplayFormat,
}

// ---------------------------------------------------------------------------
// Native entry points (JSON in, JSON out)
// ---------------------------------------------------------------------------

/// Convert a JSON array of `{id, start, end}` appointments into date-picker JSON.
///
/// `options_json` may be omitted for the default one-pass merge and
/// `DD-MM-YYYY` / `HH:mm` output.
pub fn convert_json(
    appointments_json: &str,
    options_json: Option<&str>,
) -> slot_engine::error::Result<String> {
    let appointments: Vec<Appointment> = serde_json::from_str(appointments_json)?;
    let options: ConvertOptions = match options_json {
        Some(json) if !json.trim().is_empty() => serde_json::from_str(json)?,
        _ => ConvertOptions::default(),
    };

    let picker = convert_with_mode(&appointments, options.mode)?;
    let view = picker.render(&options.format)?;
    Ok(serde_json::to_string(&view)?)
}

/// Strict overlap test on two `HH:mm` intervals.
pub fn overlap(
    start_a: &str,
    end_a: &str,
    start_b: &str,
    end_b: &str,
) -> slot_engine::error::Result<bool> {
    let a = TimeRange::new(parse_time(start_a)?, parse_time(end_a)?);
    let b = TimeRange::new(parse_time(start_b)?, parse_time(end_b)?);
    Ok(intervals_overlap(&a, &b))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Convert appointments into the date-picker structure.
///
/// Returns a JSON string `{ items: [{ date, slots: [{ id, startTime, endTime }] }] }`.
#[wasm_bindgen(js_name = "convertToDatepicker")]
pub fn convert_to_datepicker(
    appointments_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    convert_json(appointments_json, options_json.as_deref())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether two `HH:mm` intervals overlap. Touching intervals do not.
#[wasm_bindgen(js_name = "intervalsOverlap")]
pub fn intervals_overlap_js(
    start_a: &str,
    end_a: &str,
    start_b: &str,
    end_b: &str,
) -> Result<bool, JsValue> {
    overlap(start_a, end_a, start_b, end_b).map_err(|e| JsValue::from_str(&e.to_string()))
}
