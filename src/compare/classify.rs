//! Severity Classifier
//!
//! Ordered rules turning a venue diff into a concern level. First match
//! wins; venue-level events bypass the ratio rules entirely.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::compare::diff::{MultiTmdbChange, SingleTmdbChange, TmdbChange, VenueComparison, VenueDiff};

/// Per-venue verdict, ordered by how alarming it is. `Critical` anywhere in
/// a run fails the release gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Concern {
    Unchanged,
    Ok,
    Warning,
    Critical,
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concern::Unchanged => write!(f, "UNCHANGED"),
            Concern::Ok => write!(f, "OK"),
            Concern::Warning => write!(f, "WARNING"),
            Concern::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Share of the previous release's future performances that may disappear
/// before the venue is flagged critical.
const CRITICAL_REMOVED_PCT: f64 = 0.5;
/// Share above which removals alone warrant a warning.
const WARNING_REMOVED_PCT: f64 = 0.1;

/// Classify a venue diff. Evaluation order is the contract: venue removed,
/// venue added, venue emptied, then the change-ratio rules.
pub fn classify(diff: &VenueDiff) -> Concern {
    match diff {
        VenueDiff::Removed => Concern::Critical,
        VenueDiff::Added => Concern::Ok,
        VenueDiff::Compared(comparison) => classify_comparison(comparison),
    }
}

fn classify_comparison(comparison: &VenueComparison) -> Concern {
    // A venue dropping to zero showings is alarming on its own; the ratio
    // rules are skipped for this case.
    if comparison.venue_empty {
        return Concern::Warning;
    }

    let totals = &comparison.future_performances;
    let removed_pct = if totals.previous_total > 0 {
        totals.removed as f64 / totals.previous_total as f64
    } else {
        0.0
    };

    if removed_pct > CRITICAL_REMOVED_PCT {
        return Concern::Critical;
    }

    if !comparison.showings.removed.is_empty() || removed_pct > WARNING_REMOVED_PCT {
        return Concern::Warning;
    }

    if comparison.tmdb_changes.iter().any(is_tmdb_loss) {
        return Concern::Warning;
    }

    let has_any_changes = !comparison.showings.added.is_empty()
        || !comparison.showings.modified.is_empty()
        || !comparison.tmdb_changes.is_empty();
    if has_any_changes {
        return Concern::Ok;
    }

    Concern::Unchanged
}

/// Losing or swapping a catalog match degrades the data even when no
/// showing disappeared.
fn is_tmdb_loss(change: &TmdbChange) -> bool {
    let single_loss = matches!(
        change.single,
        Some(SingleTmdbChange::Lost { .. }) | Some(SingleTmdbChange::Changed { .. })
    );

    let multiple_loss = match &change.multiple {
        Some(MultiTmdbChange::Lost { .. }) => true,
        Some(MultiTmdbChange::Changed { removed, .. }) => !removed.is_empty(),
        _ => false,
    };

    single_loss || multiple_loss
}
