//! iCalendar feed parsing — converts an exported `.ics` calendar into blocked intervals.
//!
//! Rental platforms export a listing's calendar as all-day `VEVENT`s, one per
//! reservation or owner block:
//!
//! ```text
//! BEGIN:VEVENT
//! DTSTART;VALUE=DATE:20240602
//! DTEND;VALUE=DATE:20240604
//! SUMMARY:Reserved
//! END:VEVENT
//! ```
//!
//! Only date-valued `DTSTART`/`DTEND` are understood; timed events are skipped.
//! A `SUMMARY` containing `Reserved` marks a guest reservation, anything else an
//! owner block. Events that cannot be turned into a range (malformed dates,
//! end not after start) are skipped with a warning; one bad event never costs
//! the rest of the feed.

use chrono::NaiveDate;

use crate::error::{Result, StayError};
use crate::interval::{BlockKind, BlockedInterval};

/// Unfold RFC 5545 content lines: a line starting with a space or tab
/// continues the previous one.
fn unfold(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim_end_matches('\r');
        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            if let Some(last) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        lines.push(line.to_string());
    }
    lines
}

/// Split a content line into `(name, params, value)`.
///
/// `DTSTART;VALUE=DATE:20240602` → `("DTSTART", ["VALUE=DATE"], "20240602")`.
fn split_property(line: &str) -> Option<(&str, Vec<&str>, &str)> {
    let (head, value) = line.split_once(':')?;
    let mut parts = head.split(';');
    let name = parts.next()?;
    Some((name, parts.collect(), value))
}

/// Parse a DATE value (`YYYYMMDD`).
///
/// Returns `Ok(None)` for values that are not date-only (e.g. a DATE-TIME
/// without `VALUE=DATE`), and an error for malformed dates.
fn parse_date_value(params: &[&str], value: &str) -> Result<Option<NaiveDate>> {
    let value = value.trim();
    let declared_date = params
        .iter()
        .any(|p| p.eq_ignore_ascii_case("VALUE=DATE"));
    let looks_like_date = value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit());

    if !looks_like_date {
        if declared_date {
            return Err(StayError::InvalidDate(value.to_string()));
        }
        return Ok(None);
    }

    NaiveDate::parse_from_str(value, "%Y%m%d")
        .map(Some)
        .map_err(|e| StayError::InvalidDate(format!("{}: {}", value, e)))
}

#[derive(Default)]
struct PendingEvent {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    summary: Option<String>,
    /// First date that failed to parse.
    malformed: Option<StayError>,
}

impl PendingEvent {
    fn set_date(&mut self, params: &[&str], value: &str) -> Option<NaiveDate> {
        match parse_date_value(params, value) {
            Ok(date) => date,
            Err(e) => {
                self.malformed.get_or_insert(e);
                None
            }
        }
    }

    fn finish(self, index: usize) -> Option<BlockedInterval> {
        if let Some(e) = self.malformed {
            tracing::warn!(event = index, error = %e, "skipping event with malformed date");
            return None;
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            tracing::debug!(event = index, "skipping event without date-valued DTSTART/DTEND");
            return None;
        };

        let kind = match self.summary.as_deref() {
            Some(s) if s.contains("Reserved") => BlockKind::Reserved,
            _ => BlockKind::Blocked,
        };

        match BlockedInterval::new(start, end, kind) {
            Ok(interval) => Some(interval),
            Err(e) => {
                tracing::warn!(event = index, error = %e, "skipping event with empty date range");
                None
            }
        }
    }
}

/// Parse an iCalendar document into blocked intervals, in feed order.
///
/// Never fails: text that is not a calendar yields no intervals, and events
/// that do not describe a date range are dropped.
pub fn parse_calendar(text: &str) -> Vec<BlockedInterval> {
    let mut intervals = Vec::new();
    let mut current: Option<PendingEvent> = None;
    let mut index = 0usize;

    for line in unfold(text) {
        let Some((name, params, value)) = split_property(&line) else {
            continue;
        };

        match name.to_ascii_uppercase().as_str() {
            "BEGIN" if value.trim().eq_ignore_ascii_case("VEVENT") => {
                current = Some(PendingEvent::default());
            }
            "END" if value.trim().eq_ignore_ascii_case("VEVENT") => {
                if let Some(event) = current.take() {
                    if let Some(interval) = event.finish(index) {
                        intervals.push(interval);
                    }
                    index += 1;
                }
            }
            "DTSTART" => {
                if let Some(event) = current.as_mut() {
                    event.start = event.set_date(&params, value);
                }
            }
            "DTEND" => {
                if let Some(event) = current.as_mut() {
                    event.end = event.set_date(&params, value);
                }
            }
            "SUMMARY" => {
                if let Some(event) = current.as_mut() {
                    event.summary = Some(value.trim().to_string());
                }
            }
            _ => {}
        }
    }

    tracing::debug!(count = intervals.len(), "parsed calendar feed");
    intervals
}
