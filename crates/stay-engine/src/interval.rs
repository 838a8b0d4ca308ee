//! Whole-day date intervals and the overlap predicate everything else builds on.
//!
//! All intervals are half-open: `[start, end)`. A stay that checks out on the
//! day a block starts (or checks in on the day one ends) does NOT overlap it,
//! so same-day turnover is allowed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StayError};

/// A calendar date with day granularity.
pub type DateOnly = NaiveDate;

/// Why a date range is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// A confirmed guest reservation.
    Reserved,
    /// An owner-side block (maintenance, personal use, platform buffer).
    Blocked,
}

/// A date range that cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedInterval {
    pub start: DateOnly,
    pub end: DateOnly,
    #[serde(rename = "type")]
    pub kind: BlockKind,
}

impl BlockedInterval {
    /// Build a blocked interval, rejecting empty or inverted ranges.
    pub fn new(start: DateOnly, end: DateOnly, kind: BlockKind) -> Result<Self> {
        if start >= end {
            return Err(StayError::InvalidInterval { start, end });
        }
        Ok(Self { start, end, kind })
    }

    /// Whether `date` falls inside `[start, end)`.
    pub fn contains(&self, date: DateOnly) -> bool {
        self.start <= date && date < self.end
    }
}

/// A requested stay: arrive on `check_in`, leave on `check_out`.
///
/// Fields are public so the pure checker can be handed anything; use
/// [`CandidateInterval::new`] at the edge of the system to enforce
/// `check_in < check_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInterval {
    pub check_in: DateOnly,
    pub check_out: DateOnly,
}

impl CandidateInterval {
    pub fn new(check_in: DateOnly, check_out: DateOnly) -> Result<Self> {
        if check_in >= check_out {
            return Err(StayError::InvalidInterval {
                start: check_in,
                end: check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Number of nights in the stay.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Whether this stay overlaps the given blocked interval.
    pub fn overlaps(&self, blocked: &BlockedInterval) -> bool {
        overlaps(self.check_in, self.check_out, blocked.start, blocked.end)
    }
}

/// Half-open overlap test: `[a_start, a_end)` and `[b_start, b_end)` overlap
/// iff `a_start < b_end && a_end > b_start`.
///
/// Abutting ranges (`a_end == b_start` or `a_start == b_end`) do not overlap.
pub fn overlaps(a_start: DateOnly, a_end: DateOnly, b_start: DateOnly, b_end: DateOnly) -> bool {
    a_start < b_end && a_end > b_start
}
