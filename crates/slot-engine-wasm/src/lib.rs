//! WASM bindings for slot-engine.
//!
//! Exposes conflict detection and slot suggestion to a browser calendar via
//! `wasm-bindgen`. Requests, stored events and configuration all cross the
//! boundary as JSON strings, in the same shapes the `slotctl` CLI reads.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::Serialize;
use slot_engine::api::{self, ScheduleRequest};
use slot_engine::{Event, FixedClock, SchedulingConfig};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON plumbing, kept free of JsValue so it can be tested natively
// ---------------------------------------------------------------------------

/// Parse the request, the fallback event store and the configuration.
///
/// An empty `fallback_json` means "no stored events"; an empty
/// `config_json` means the default configuration.
fn parse_inputs(
    request_json: &str,
    fallback_json: &str,
    config_json: &str,
) -> Result<(ScheduleRequest, Vec<Event>, SchedulingConfig), String> {
    let request = ScheduleRequest::from_json(request_json)
        .map_err(|e| format!("Invalid request JSON: {}", e))?;

    let fallback = if fallback_json.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(fallback_json).map_err(|e| format!("Invalid events JSON: {}", e))?
    };

    let config = if config_json.trim().is_empty() {
        SchedulingConfig::default()
    } else {
        serde_json::from_str(config_json).map_err(|e| format!("Invalid config JSON: {}", e))?
    };

    Ok((request, fallback, config))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn detect_conflicts_json(
    request_json: &str,
    fallback_json: &str,
    config_json: &str,
) -> Result<String, String> {
    let (request, fallback, config) = parse_inputs(request_json, fallback_json, config_json)?;
    let response =
        api::check_conflicts(request, &fallback, &config).map_err(|e| e.to_string())?;
    to_json(&response)
}

fn suggest_times_json(
    request_json: &str,
    fallback_json: &str,
    config_json: &str,
    now_millis: f64,
) -> Result<String, String> {
    let (request, fallback, config) = parse_inputs(request_json, fallback_json, config_json)?;
    if !now_millis.is_finite() {
        return Err(format!("Invalid clock value: {}", now_millis));
    }
    let now = slot_engine::instant::from_millis(now_millis as i64).map_err(|e| e.to_string())?;
    let response = api::suggest(request, &fallback, &config, &FixedClock(now))
        .map_err(|e| e.to_string())?;
    to_json(&response)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Detect per-participant conflicts for a proposed event.
///
/// `request_json` is `{ proposedEvent, existingEvents? }`. When
/// `existingEvents` is absent the events in `fallback_json` (a JSON array,
/// or empty string) are used. `config_json` may be empty for defaults.
/// Returns `{ conflicts: [...] }` as a JSON string.
#[wasm_bindgen(js_name = "detectConflicts")]
pub fn detect_conflicts(
    request_json: &str,
    fallback_json: &str,
    config_json: &str,
) -> Result<String, JsValue> {
    detect_conflicts_json(request_json, fallback_json, config_json)
        .map_err(|e| JsValue::from_str(&e))
}

/// Suggest conflict-free alternative slots for a proposed event.
///
/// Arguments as for [`detect_conflicts`], plus `now_millis`, the current
/// time as returned by `Date.now()`. Returns `{ suggestions: [...] }`.
#[wasm_bindgen(js_name = "suggestTimes")]
pub fn suggest_times(
    request_json: &str,
    fallback_json: &str,
    config_json: &str,
    now_millis: f64,
) -> Result<String, JsValue> {
    suggest_times_json(request_json, fallback_json, config_json, now_millis)
        .map_err(|e| JsValue::from_str(&e))
}
