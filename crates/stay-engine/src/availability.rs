//! Check a requested stay against the blocked intervals of a calendar.
//!
//! The blocked set is scanned in the order given and the first overlapping
//! interval is reported as the conflict. Callers that need a deterministic
//! conflict must therefore supply a stable order; the checker never re-sorts.

use serde::{Deserialize, Serialize};

use crate::interval::{BlockedInterval, CandidateInterval};

/// Outcome of an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AvailabilityDto", from = "AvailabilityDto")]
pub struct AvailabilityResult {
    /// First blocked interval overlapping the stay, in input order.
    pub conflict: Option<BlockedInterval>,
}

impl AvailabilityResult {
    pub fn is_available(&self) -> bool {
        self.conflict.is_none()
    }
}

#[derive(Serialize, Deserialize)]
struct AvailabilityDto {
    available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conflict: Option<BlockedInterval>,
}

impl From<AvailabilityResult> for AvailabilityDto {
    fn from(r: AvailabilityResult) -> Self {
        Self {
            available: r.is_available(),
            conflict: r.conflict,
        }
    }
}

impl From<AvailabilityDto> for AvailabilityResult {
    fn from(dto: AvailabilityDto) -> Self {
        Self {
            conflict: dto.conflict,
        }
    }
}

/// Check whether `candidate` is free of every interval in `blocked`.
///
/// Uses the half-open overlap predicate, so a stay that abuts a block on
/// either side is available. Does not validate `check_in < check_out`; an
/// inverted candidate produces an unspecified result.
pub fn check(candidate: &CandidateInterval, blocked: &[BlockedInterval]) -> AvailabilityResult {
    AvailabilityResult {
        conflict: blocked.iter().find(|b| candidate.overlaps(b)).copied(),
    }
}
