//! Property-based tests for availability checking and the alternative search.
//!
//! These verify invariants that hold for *any* calendar, not just the fixed
//! scenarios in `availability_tests.rs` and `alternatives_tests.rs`.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use stay_engine::alternatives::{HORIZON_DAYS, MAX_ALTERNATIVES};
use stay_engine::{
    check, find_alternatives, BlockKind, BlockedInterval, CandidateInterval, DateOnly,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base() -> DateOnly {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn arb_kind() -> impl Strategy<Value = BlockKind> {
    prop_oneof![Just(BlockKind::Reserved), Just(BlockKind::Blocked)]
}

/// A block starting within ~5 months of the base date, 1-20 nights long.
fn arb_block() -> impl Strategy<Value = BlockedInterval> {
    (0i64..150, 1i64..=20, arb_kind()).prop_map(|(offset, len, kind)| {
        let start = base() + Duration::days(offset);
        BlockedInterval::new(start, start + Duration::days(len), kind).unwrap()
    })
}

fn arb_feed() -> impl Strategy<Value = Vec<BlockedInterval>> {
    prop::collection::vec(arb_block(), 0..12)
}

fn arb_stay() -> impl Strategy<Value = CandidateInterval> {
    (0i64..120, 1i64..=14).prop_map(|(offset, nights)| {
        let check_in = base() + Duration::days(offset);
        CandidateInterval::new(check_in, check_in + Duration::days(nights)).unwrap()
    })
}

fn arb_now() -> impl Strategy<Value = DateOnly> {
    (0i64..60).prop_map(|offset| base() + Duration::days(offset))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn conflict_iff_some_block_overlaps(stay in arb_stay(), feed in arb_feed()) {
        let result = check(&stay, &feed);
        let expected = feed
            .iter()
            .find(|b| stay.check_in < b.end && stay.check_out > b.start)
            .copied();
        prop_assert_eq!(result.conflict, expected);
        prop_assert_eq!(result.is_available(), expected.is_none());
    }

    #[test]
    fn abutting_blocks_never_conflict(
        stay in arb_stay(),
        before in 1i64..10,
        after in 1i64..10
    ) {
        let ends_at_check_in = BlockedInterval::new(
            stay.check_in - Duration::days(before),
            stay.check_in,
            BlockKind::Reserved,
        )
        .unwrap();
        let starts_at_check_out = BlockedInterval::new(
            stay.check_out,
            stay.check_out + Duration::days(after),
            BlockKind::Blocked,
        )
        .unwrap();
        let feed = vec![ends_at_check_in, starts_at_check_out];
        prop_assert!(check(&stay, &feed).is_available());
    }

    #[test]
    fn windows_respect_calendar_and_horizon(
        stay in arb_stay(),
        feed in arb_feed(),
        nights_needed in -2i64..=14,
        now in arb_now(),
    ) {
        let alts = find_alternatives(&stay, &feed, nights_needed, now);
        let horizon = now + Duration::days(HORIZON_DAYS);
        let floor = if nights_needed <= 0 { 2 } else { nights_needed.min(2) };

        prop_assert!(alts.len() <= MAX_ALTERNATIVES);

        for w in &alts {
            prop_assert!(w.start < w.end);
            prop_assert!(w.start >= now);
            prop_assert!(w.end <= horizon);
            prop_assert_eq!(w.nights, (w.end - w.start).num_days());
            prop_assert!(w.nights >= floor);
            for b in &feed {
                prop_assert!(
                    !(w.start < b.end && w.end > b.start),
                    "window {:?} overlaps block {:?}", w, b
                );
            }
        }

        for pair in alts.windows(2) {
            prop_assert!(pair[0].end < pair[1].start, "windows out of order: {:?}", pair);
        }
    }

    #[test]
    fn empty_feed_gives_at_most_one_window(stay in arb_stay(), now in arb_now()) {
        let alts = find_alternatives(&stay, &[], stay.nights(), now);
        prop_assert!(alts.len() <= 1);
    }

    #[test]
    fn search_is_deterministic(stay in arb_stay(), feed in arb_feed(), now in arb_now()) {
        let first = find_alternatives(&stay, &feed, stay.nights(), now);
        let second = find_alternatives(&stay, &feed, stay.nights(), now);
        prop_assert_eq!(first, second);
    }
}
