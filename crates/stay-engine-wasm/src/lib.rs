//! WASM bindings for stay-engine.
//!
//! Exposes availability checking, the alternative-window search, calendar
//! parsing and full request evaluation to JavaScript via `wasm-bindgen`. All
//! complex types cross the boundary as JSON strings; dates are ISO
//! `YYYY-MM-DD` strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p stay-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/stay_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use stay_engine::{BlockedInterval, CandidateInterval, PricingQuote, StayRequest};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse inputs coming from JavaScript
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

/// Parse and validate a stay from check-in and check-out strings.
fn parse_stay(check_in: &str, check_out: &str) -> Result<CandidateInterval, JsValue> {
    CandidateInterval::new(parse_date(check_in)?, parse_date(check_out)?)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Input format for blocked intervals passed from JavaScript.
///
/// Mirrors the `calendar` output, so a parsed feed can be handed straight back.
#[derive(Deserialize)]
struct BlockedInput {
    start: String,
    end: String,
    #[serde(rename = "type")]
    kind: stay_engine::BlockKind,
}

/// Convert a JSON array of `{start, end, type}` objects into blocked intervals.
fn parse_blocked_json(json: &str) -> Result<Vec<BlockedInterval>, JsValue> {
    let inputs: Vec<BlockedInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid blocked JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_date(&input.start)?;
            let end = parse_date(&input.end)?;
            BlockedInterval::new(start, end, input.kind)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        })
        .collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Check whether a stay is free of every blocked interval.
///
/// `blocked_json` is a JSON array of `{start, end, type}` objects. Returns
/// `{"available": bool, "conflict"?: {...}}` as a JSON string.
#[wasm_bindgen(js_name = "checkAvailability")]
pub fn check_availability(
    check_in: &str,
    check_out: &str,
    blocked_json: &str,
) -> Result<String, JsValue> {
    let stay = parse_stay(check_in, check_out)?;
    let blocked = parse_blocked_json(blocked_json)?;

    to_json(&stay_engine::check(&stay, &blocked))
}

/// Propose up to three open windows within 90 days of `today`.
///
/// `nights_needed` defaults to the stay length. Returns a JSON array of
/// `{start, end, nights}` objects.
#[wasm_bindgen(js_name = "findAlternatives")]
pub fn find_alternatives(
    check_in: &str,
    check_out: &str,
    blocked_json: &str,
    today: &str,
    nights_needed: Option<i32>,
) -> Result<String, JsValue> {
    let stay = parse_stay(check_in, check_out)?;
    let blocked = parse_blocked_json(blocked_json)?;
    let now = parse_date(today)?;
    let nights = nights_needed.map_or(stay.nights(), i64::from);

    to_json(&stay_engine::find_alternatives(&stay, &blocked, nights, now))
}

/// Parse an iCalendar feed into `{"blocked": [{start, end, type}, ...]}`.
#[wasm_bindgen(js_name = "parseCalendar")]
pub fn parse_calendar(ics: &str) -> Result<String, JsValue> {
    let blocked = stay_engine::parse_calendar(ics);
    to_json(&stay_engine::calendar_view(&blocked))
}

/// Evaluate a full stay request.
///
/// `request_json` is `{check_in, check_out, guests?, now}`. `pricing_json`, if
/// given, is the raw pricing oracle response body; an unusable body is
/// treated as "no pricing" rather than an error.
#[wasm_bindgen(js_name = "evaluateStay")]
pub fn evaluate_stay(
    request_json: &str,
    blocked_json: &str,
    pricing_json: Option<String>,
) -> Result<String, JsValue> {
    let request: StayRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {}", e)))?;
    let blocked = parse_blocked_json(blocked_json)?;
    let pricing: Option<PricingQuote> = pricing_json
        .as_deref()
        .and_then(|body| stay_engine::parse_listing_prices(body).ok().flatten());

    let report = stay_engine::evaluate(&request, &blocked, pricing)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&report)
}
