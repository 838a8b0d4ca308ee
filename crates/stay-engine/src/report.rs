//! Compose the full answer to one stay request.
//!
//! The caller fetches the calendar feed and (optionally) a pricing quote, then
//! hands both to [`evaluate`]. Availability is checked first; alternatives are
//! only searched when the requested dates conflict. Pricing is attached
//! whenever a quote was obtained, booked or not.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alternatives::{find_alternatives, AlternativeWindow};
use crate::availability::check;
use crate::error::Result;
use crate::interval::{BlockedInterval, CandidateInterval, DateOnly};
use crate::pricing::{DayPrice, PricingQuote};

fn default_guests() -> u32 {
    2
}

/// A stay request as received from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayRequest {
    pub check_in: DateOnly,
    pub check_out: DateOnly,
    #[serde(default = "default_guests")]
    pub guests: u32,
    /// Today's date, anchoring the alternative search horizon.
    pub now: DateOnly,
}

impl StayRequest {
    /// Validate the requested dates.
    ///
    /// # Errors
    /// Returns `StayError::InvalidInterval` unless `check_in < check_out`.
    pub fn candidate(&self) -> Result<CandidateInterval> {
        CandidateInterval::new(self.check_in, self.check_out)
    }
}

/// Pricing as presented to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSummary {
    pub total: f64,
    pub per_night_avg: f64,
    pub breakdown: Vec<DayPrice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_nights: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Value>,
}

impl PricingSummary {
    fn from_quote(quote: PricingQuote, nights: i64) -> Self {
        let per_night_avg = if nights > 0 {
            (quote.total / nights as f64).round()
        } else {
            0.0
        };
        Self {
            total: quote.total,
            per_night_avg,
            breakdown: quote.per_day_prices,
            min_nights: quote.rules.min_nights,
            restrictions: quote.rules.restrictions,
            rules: quote.rules.rules,
        }
    }
}

/// Answer to one stay request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayReport {
    pub check_in: DateOnly,
    pub check_out: DateOnly,
    pub nights: i64,
    pub guests: u32,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict: Option<BlockedInterval>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<AlternativeWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingSummary>,
}

/// Evaluate `request` against the calendar's blocked intervals.
///
/// # Errors
/// Returns `StayError::InvalidInterval` if the request's check-in is not
/// before its check-out. No other failure is possible; a missing pricing
/// quote is simply left out of the report.
pub fn evaluate(
    request: &StayRequest,
    blocked: &[BlockedInterval],
    pricing: Option<PricingQuote>,
) -> Result<StayReport> {
    let candidate = request.candidate()?;
    let nights = candidate.nights();
    let availability = check(&candidate, blocked);

    let alternatives = if availability.is_available() {
        Vec::new()
    } else {
        find_alternatives(&candidate, blocked, nights, request.now)
    };

    Ok(StayReport {
        check_in: request.check_in,
        check_out: request.check_out,
        nights,
        guests: request.guests,
        available: availability.is_available(),
        conflict: availability.conflict,
        alternatives,
        pricing: pricing.map(|q| PricingSummary::from_quote(q, nights)),
    })
}

/// Blocked ranges for calendar display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarView {
    pub blocked: Vec<BlockedInterval>,
}

/// Wrap the blocked intervals for display, in feed order.
pub fn calendar_view(blocked: &[BlockedInterval]) -> CalendarView {
    CalendarView {
        blocked: blocked.to_vec(),
    }
}
