//! Release Comparison Module
//!
//! The pure core of the gate: matching performances across releases,
//! diffing venues, and classifying the result. No I/O happens here - the
//! loader and the report generator sit on either side.

pub mod classify;
pub mod diff;
pub mod matcher;

pub use classify::{classify, Concern};
pub use diff::{DiffEngine, VenueDiff};

use crate::listings::Showing;

/// Diff plus verdict for one venue.
#[derive(Debug, Clone)]
pub struct VenueReport {
    pub diff: VenueDiff,
    pub concern: Concern,
}

impl VenueReport {
    /// Compare one venue across two releases and classify the result.
    ///
    /// `None` means the venue file is absent from that release, which is a
    /// venue-level event rather than an error.
    pub fn build(latest: Option<&[Showing]>, previous: Option<&[Showing]>, now: i64) -> Self {
        let diff = match (latest, previous) {
            (Some(_), None) => VenueDiff::Added,
            (None, Some(_)) => VenueDiff::Removed,
            (latest, previous) => VenueDiff::Compared(DiffEngine::compare_venue(
                latest.unwrap_or_default(),
                previous.unwrap_or_default(),
                now,
            )),
        };
        let concern = classify(&diff);
        Self { diff, concern }
    }
}
