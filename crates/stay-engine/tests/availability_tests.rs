//! Tests for availability checking against blocked intervals.

use stay_engine::{check, BlockKind, BlockedInterval, CandidateInterval, DateOnly};

fn d(s: &str) -> DateOnly {
    s.parse().unwrap()
}

fn stay(check_in: &str, check_out: &str) -> CandidateInterval {
    CandidateInterval::new(d(check_in), d(check_out)).unwrap()
}

fn reserved(start: &str, end: &str) -> BlockedInterval {
    BlockedInterval::new(d(start), d(end), BlockKind::Reserved).unwrap()
}

fn blocked(start: &str, end: &str) -> BlockedInterval {
    BlockedInterval::new(d(start), d(end), BlockKind::Blocked).unwrap()
}

#[test]
fn empty_calendar_is_available() {
    let result = check(&stay("2024-06-01", "2024-06-05"), &[]);

    assert!(result.is_available());
    assert_eq!(result.conflict, None);
}

#[test]
fn reservation_inside_stay_conflicts() {
    let feed = vec![reserved("2024-06-02", "2024-06-04")];

    let result = check(&stay("2024-06-01", "2024-06-05"), &feed);

    assert!(!result.is_available());
    let conflict = result.conflict.expect("conflict must be reported");
    assert_eq!(conflict.kind, BlockKind::Reserved);
    assert_eq!(conflict.start, d("2024-06-02"));
    assert_eq!(conflict.end, d("2024-06-04"));
}

#[test]
fn checkout_on_block_start_is_available() {
    // Guest leaves the morning the next block begins.
    let feed = vec![reserved("2024-06-04", "2024-06-06")];

    assert!(check(&stay("2024-06-01", "2024-06-04"), &feed).is_available());
}

#[test]
fn checkin_on_block_end_is_available() {
    // Previous guest leaves the morning this one arrives.
    let feed = vec![reserved("2024-05-28", "2024-06-01")];

    assert!(check(&stay("2024-06-01", "2024-06-04"), &feed).is_available());
}

#[test]
fn stay_inside_long_block_conflicts() {
    let feed = vec![blocked("2024-05-01", "2024-07-01")];

    let result = check(&stay("2024-06-10", "2024-06-12"), &feed);

    assert_eq!(result.conflict, Some(feed[0]));
}

#[test]
fn single_night_overlap_on_either_edge_conflicts() {
    let feed = vec![blocked("2024-06-04", "2024-06-08")];

    assert!(!check(&stay("2024-06-01", "2024-06-05"), &feed).is_available());
    assert!(!check(&stay("2024-06-07", "2024-06-10"), &feed).is_available());
}

#[test]
fn first_overlapping_interval_in_input_order_wins() {
    // The second block overlaps more nights, but the first one is reported.
    let small = blocked("2024-06-04", "2024-06-05");
    let large = reserved("2024-06-01", "2024-06-05");

    let result = check(&stay("2024-06-01", "2024-06-05"), &[small, large]);
    assert_eq!(result.conflict, Some(small));

    let result = check(&stay("2024-06-01", "2024-06-05"), &[large, small]);
    assert_eq!(result.conflict, Some(large));
}

#[test]
fn non_overlapping_blocks_are_skipped() {
    let feed = vec![
        blocked("2024-05-01", "2024-05-03"),
        reserved("2024-06-10", "2024-06-15"),
        blocked("2024-06-03", "2024-06-04"),
    ];

    let result = check(&stay("2024-06-01", "2024-06-05"), &feed);

    assert_eq!(result.conflict, Some(feed[2]));
}

#[test]
fn result_serializes_with_available_flag() {
    let feed = vec![reserved("2024-06-02", "2024-06-04")];

    let free = serde_json::to_value(check(&stay("2024-06-10", "2024-06-12"), &feed)).unwrap();
    assert_eq!(free, serde_json::json!({"available": true}));

    let taken = serde_json::to_value(check(&stay("2024-06-01", "2024-06-05"), &feed)).unwrap();
    assert_eq!(
        taken,
        serde_json::json!({
            "available": false,
            "conflict": {"start": "2024-06-02", "end": "2024-06-04", "type": "reserved"}
        })
    );
}
