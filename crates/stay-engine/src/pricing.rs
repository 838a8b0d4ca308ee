//! Typed model of the dynamic pricing oracle's `listing_prices` payload.
//!
//! The oracle returns one entry per listing; the first entry's `data` array
//! holds one record per night. Listing-level rules (minimum stay and the
//! like) ride along as optional sidecar fields. Pricing is informational only:
//! availability and alternatives never depend on it, so field values of an
//! unexpected type read as absent instead of failing the whole payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::interval::{CandidateInterval, DateOnly};

/// Price for a single night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPrice {
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateOnly>,
    /// Missing prices count as zero toward the total.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    /// Per-night fields the oracle adds (`min_stay`, `demand_desc`, ...),
    /// passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DayPrice {
    pub fn new(date: Option<DateOnly>, price: Option<f64>) -> Self {
        Self {
            date,
            price,
            extra: Map::new(),
        }
    }
}

/// Listing-level booking rules reported alongside the prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingRules {
    #[serde(
        default,
        deserialize_with = "lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_nights: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Value>,
}

/// Nightly prices and their total for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingQuote {
    pub per_day_prices: Vec<DayPrice>,
    pub total: f64,
    #[serde(flatten)]
    pub rules: PricingRules,
}

impl PricingQuote {
    /// Build a quote from nightly prices, summing the total.
    pub fn from_days(per_day_prices: Vec<DayPrice>, rules: PricingRules) -> Self {
        let total = per_day_prices.iter().filter_map(|d| d.price).sum();
        Self {
            per_day_prices,
            total,
            rules,
        }
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<f64>, D::Error> {
    let number = match Option::<Value>::deserialize(de)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(number.filter(|n: &f64| n.is_finite()))
}

fn lenient_u32<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<u32>, D::Error> {
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_date<'de, D: Deserializer<'de>>(
    de: D,
) -> std::result::Result<Option<DateOnly>, D::Error> {
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// One listing in the oracle's response array.
#[derive(Debug, Deserialize)]
struct ListingPrices {
    #[serde(default)]
    data: Option<Vec<DayPrice>>,
    #[serde(flatten)]
    rules: PricingRules,
}

/// Parse the oracle's response body.
///
/// Returns `Ok(None)` when the response holds no listing or the first listing
/// has no `data` array.
///
/// # Errors
/// Returns `StayError::Json` if the body is not the expected JSON shape.
pub fn parse_listing_prices(json: &str) -> Result<Option<PricingQuote>> {
    let listings: Vec<ListingPrices> = serde_json::from_str(json)?;
    let Some(first) = listings.into_iter().next() else {
        return Ok(None);
    };
    Ok(first
        .data
        .map(|days| PricingQuote::from_days(days, first.rules)))
}

/// Request body for the oracle's `listing_prices` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPricesRequest {
    pub listings: Vec<ListingRange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingRange {
    pub id: String,
    pub pms: String,
    #[serde(rename = "dateFrom")]
    pub date_from: DateOnly,
    #[serde(rename = "dateTo")]
    pub date_to: DateOnly,
}

impl ListingPricesRequest {
    /// Ask for the prices of one Airbnb-managed listing over `range`.
    pub fn for_range(listing_id: &str, range: &CandidateInterval) -> Self {
        Self {
            listings: vec![ListingRange {
                id: listing_id.to_string(),
                pms: "airbnb".to_string(),
                date_from: range.check_in,
                date_to: range.check_out,
            }],
        }
    }
}
