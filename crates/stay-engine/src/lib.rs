//! # stay-engine
//!
//! Availability and alternative-window search for a single rental calendar.
//!
//! Answers "is the place free from X to Y, and if not, when is it free?" from
//! a list of blocked whole-day intervals. Everything here is a pure function of
//! its inputs: fetching the calendar feed and the pricing quote is left to the
//! caller, which hands the parsed results in.
//!
//! ## Modules
//!
//! - [`interval`] — Date intervals and the half-open overlap predicate
//! - [`availability`] — Check a requested stay against blocked intervals
//! - [`alternatives`] — Scan a 90-day horizon for up to three open windows
//! - [`ical`] — iCalendar feed text → blocked intervals
//! - [`pricing`] — Typed pricing quotes parsed from the pricing oracle payload
//! - [`report`] — Compose a full answer for one stay request
//! - [`error`] — Error types

pub mod alternatives;
pub mod availability;
pub mod error;
pub mod ical;
pub mod interval;
pub mod pricing;
pub mod report;

pub use alternatives::{find_alternatives, AlternativeWindow};
pub use availability::{check, AvailabilityResult};
pub use error::StayError;
pub use ical::parse_calendar;
pub use interval::{BlockKind, BlockedInterval, CandidateInterval, DateOnly};
pub use pricing::{parse_listing_prices, PricingQuote};
pub use report::{calendar_view, evaluate, CalendarView, StayReport, StayRequest};
