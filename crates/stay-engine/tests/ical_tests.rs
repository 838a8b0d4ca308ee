//! Tests for iCalendar feed parsing.

use stay_engine::{parse_calendar, BlockKind, DateOnly};

fn d(s: &str) -> DateOnly {
    s.parse().unwrap()
}

/// Shape of a typical rental platform export (CRLF line endings).
const FEED: &str = "BEGIN:VCALENDAR\r\n\
PRODID;X-RICAL-TZSOURCE=TZINFO:-//Airbnb Inc//Hosting Calendar 1.0//EN\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTEND;VALUE=DATE:20240604\r\n\
DTSTART;VALUE=DATE:20240602\r\n\
UID:1418fb94e984-a1b2c3@airbnb.com\r\n\
DESCRIPTION:Reservation URL: https://www.airbnb.com/hosting/reservations/details/HM\r\n ABC123\r\n\
SUMMARY:Reserved\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
DTEND;VALUE=DATE:20240625\r\n\
DTSTART;VALUE=DATE:20240620\r\n\
UID:7f3ad9e2-b1@airbnb.com\r\n\
SUMMARY:Airbnb (Not available)\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

#[test]
fn parses_reserved_and_blocked_events_in_feed_order() {
    let intervals = parse_calendar(FEED);

    assert_eq!(intervals.len(), 2);

    assert_eq!(intervals[0].start, d("2024-06-02"));
    assert_eq!(intervals[0].end, d("2024-06-04"));
    assert_eq!(intervals[0].kind, BlockKind::Reserved);

    assert_eq!(intervals[1].start, d("2024-06-20"));
    assert_eq!(intervals[1].end, d("2024-06-25"));
    assert_eq!(intervals[1].kind, BlockKind::Blocked);
}

#[test]
fn empty_or_eventless_feed_is_empty() {
    assert!(parse_calendar("").is_empty());
    assert!(parse_calendar("BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n").is_empty());
}

#[test]
fn lf_line_endings_and_bare_date_values_accepted() {
    let feed = "BEGIN:VEVENT\nDTSTART:20240701\nDTEND:20240703\nSUMMARY:Reserved\nEND:VEVENT\n";

    let intervals = parse_calendar(feed);

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, d("2024-07-01"));
    assert_eq!(intervals[0].kind, BlockKind::Reserved);
}

#[test]
fn missing_summary_is_blocked() {
    let feed = "BEGIN:VEVENT\nDTSTART;VALUE=DATE:20240701\nDTEND;VALUE=DATE:20240703\nEND:VEVENT\n";

    let intervals = parse_calendar(feed);

    assert_eq!(intervals[0].kind, BlockKind::Blocked);
}

#[test]
fn timed_events_are_skipped() {
    let feed = "BEGIN:VEVENT\n\
DTSTART:20240701T150000Z\n\
DTEND:20240703T110000Z\n\
SUMMARY:Reserved\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20240710\n\
DTEND;VALUE=DATE:20240712\n\
END:VEVENT\n";

    let intervals = parse_calendar(feed);

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, d("2024-07-10"));
}

#[test]
fn empty_range_events_are_skipped() {
    let feed = "BEGIN:VEVENT\nDTSTART;VALUE=DATE:20240705\nDTEND;VALUE=DATE:20240705\nEND:VEVENT\n";

    assert!(parse_calendar(feed).is_empty());
}

#[test]
fn properties_outside_events_are_ignored() {
    let feed = "DTSTART;VALUE=DATE:20240101\n\
BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20240705\n\
DTEND;VALUE=DATE:20240706\n\
END:VEVENT\n\
DTEND;VALUE=DATE:20240801\n";

    let intervals = parse_calendar(feed);

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].end, d("2024-07-06"));
}

#[test]
fn malformed_date_skips_only_that_event() {
    let feed = "BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20240231\n\
DTEND;VALUE=DATE:20240302\n\
SUMMARY:Reserved\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:2024-06-10\n\
DTEND;VALUE=DATE:20240612\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20240615\n\
DTEND;VALUE=DATE:20240618\n\
SUMMARY:Reserved\n\
END:VEVENT\n";

    let intervals = parse_calendar(feed);

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, d("2024-06-15"));
    assert_eq!(intervals[0].kind, BlockKind::Reserved);
}
