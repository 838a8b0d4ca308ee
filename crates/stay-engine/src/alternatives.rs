//! Find open windows near a stay that could not be booked.
//!
//! Sorts the blocked intervals by start, then walks a cursor forward from
//! shortly before the requested check-in (never before "today") to a fixed
//! horizon. Each open run between blocks is offered as an alternative if it is
//! long enough, until three have been collected.
//!
//! The walk is an explicit state machine:
//!
//! ```text
//! Scanning ──(cursor inside a block)──▶ InsideBlock ──▶ Scanning
//!    │
//!    ├──(open run found)──▶ Emit ──▶ Scanning
//!    │
//!    └──(horizon reached or result cap hit)──▶ Done
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::interval::{BlockedInterval, CandidateInterval, DateOnly};

/// How far past "today" the search looks.
pub const HORIZON_DAYS: i64 = 90;
/// How far before the requested check-in the search starts.
pub const LOOKBACK_DAYS: i64 = 14;
/// Maximum number of windows returned.
pub const MAX_ALTERNATIVES: usize = 3;
/// Windows at least this long are offered even when shorter than the request.
pub const MIN_ALTERNATIVE_NIGHTS: i64 = 2;

/// An open run of dates, bounded by blocks or by the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeWindow {
    pub start: DateOnly,
    pub end: DateOnly,
    pub nights: i64,
}

/// Bounds on the alternative scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    /// Days after `now` where the scan stops.
    pub horizon_days: i64,
    /// Stop after this many windows have been collected.
    pub max_results: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            horizon_days: HORIZON_DAYS,
            max_results: MAX_ALTERNATIVES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning(DateOnly),
    InsideBlock { resume_at: DateOnly },
    Emit { start: DateOnly, window_end: DateOnly },
    Done,
}

struct Scan<'a> {
    sorted: &'a [BlockedInterval],
    max_date: DateOnly,
    min_nights: i64,
    max_results: usize,
    found: Vec<AlternativeWindow>,
}

impl Scan<'_> {
    fn step(&mut self, state: ScanState) -> ScanState {
        match state {
            ScanState::Scanning(current) => {
                if current >= self.max_date || self.found.len() >= self.max_results {
                    return ScanState::Done;
                }
                if let Some(block) = self.sorted.iter().find(|b| b.contains(current)) {
                    return ScanState::InsideBlock {
                        resume_at: block.end,
                    };
                }
                let window_end = self
                    .sorted
                    .iter()
                    .find(|b| b.start > current)
                    .map_or(self.max_date, |b| b.start.min(self.max_date));
                ScanState::Emit {
                    start: current,
                    window_end,
                }
            }
            ScanState::InsideBlock { resume_at } => ScanState::Scanning(resume_at),
            ScanState::Emit { start, window_end } => {
                let nights = (window_end - start).num_days();
                if nights >= self.min_nights {
                    self.found.push(AlternativeWindow {
                        start,
                        end: window_end,
                        nights,
                    });
                }
                ScanState::Scanning(self.skip_blocks(window_end + Duration::days(1)))
            }
            ScanState::Done => ScanState::Done,
        }
    }

    /// Move `date` past every block that contains it, chaining through
    /// back-to-back blocks.
    fn skip_blocks(&self, mut date: DateOnly) -> DateOnly {
        for block in self.sorted {
            if block.contains(date) {
                date = block.end;
            }
        }
        date
    }
}

/// Shortest window worth offering for a request of `nights_needed` nights.
fn min_window_nights(nights_needed: i64) -> i64 {
    if nights_needed <= 0 {
        MIN_ALTERNATIVE_NIGHTS
    } else {
        nights_needed.min(MIN_ALTERNATIVE_NIGHTS)
    }
}

/// Propose up to [`MAX_ALTERNATIVES`] open windows within [`HORIZON_DAYS`] of `now`.
///
/// Scanning starts at `max(now, candidate.check_in - 14 days)`. A window is
/// kept when it spans at least `min(nights_needed, 2)` nights, so shorter
/// stays near the requested dates are still surfaced. Windows come back in
/// chronological order and never overlap a blocked interval.
///
/// `blocked` may be in any order; an empty set yields a single window from the
/// scan start to the horizon.
pub fn find_alternatives(
    candidate: &CandidateInterval,
    blocked: &[BlockedInterval],
    nights_needed: i64,
    now: DateOnly,
) -> Vec<AlternativeWindow> {
    find_alternatives_with_limits(candidate, blocked, nights_needed, now, ScanLimits::default())
}

/// [`find_alternatives`] with an explicit horizon and result cap.
pub fn find_alternatives_with_limits(
    candidate: &CandidateInterval,
    blocked: &[BlockedInterval],
    nights_needed: i64,
    now: DateOnly,
    limits: ScanLimits,
) -> Vec<AlternativeWindow> {
    let mut sorted = blocked.to_vec();
    sorted.sort_by_key(|b| b.start);

    let mut scan = Scan {
        sorted: &sorted,
        max_date: now + Duration::days(limits.horizon_days),
        min_nights: min_window_nights(nights_needed),
        max_results: limits.max_results,
        found: Vec::new(),
    };

    let start = now.max(candidate.check_in - Duration::days(LOOKBACK_DAYS));
    let mut state = ScanState::Scanning(start);
    while state != ScanState::Done {
        state = scan.step(state);
    }

    scan.found
}
