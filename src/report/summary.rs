//! Run-wide Summary
//!
//! Aggregate counters across every venue in the run, shared by the console
//! report and the JSON artifact.

use serde::{Deserialize, Serialize};

use crate::compare::diff::{MultiTmdbChange, SingleTmdbChange, VenueDiff};
use crate::compare::VenueReport;

/// Summary statistics for one comparison run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_venues: usize,
    pub venues_added: usize,
    pub venues_removed: usize,
    pub venues_empty: usize,
    pub showings_added: usize,
    pub showings_removed: usize,
    pub future_performances_added: usize,
    pub future_performances_removed: usize,
    pub tmdb_matches_gained: usize,
    pub tmdb_matches_lost: usize,
    pub tmdb_matches_changed: usize,
}

/// Tally every venue report into one summary.
pub fn compute_summary<'a, I>(reports: I) -> Summary
where
    I: IntoIterator<Item = &'a VenueReport>,
{
    let mut summary = Summary::default();

    for report in reports {
        summary.total_venues += 1;

        let comparison = match &report.diff {
            VenueDiff::Added => {
                summary.venues_added += 1;
                continue;
            }
            VenueDiff::Removed => {
                summary.venues_removed += 1;
                continue;
            }
            VenueDiff::Compared(comparison) => comparison,
        };

        if comparison.venue_empty {
            summary.venues_empty += 1;
        }

        summary.showings_added += comparison.showings.added.len();
        summary.showings_removed += comparison.showings.removed.len();
        summary.future_performances_added += comparison.future_performances.added;
        summary.future_performances_removed += comparison.future_performances.removed;

        for change in &comparison.tmdb_changes {
            match &change.single {
                Some(SingleTmdbChange::Gained { .. }) => summary.tmdb_matches_gained += 1,
                Some(SingleTmdbChange::Lost { .. }) => summary.tmdb_matches_lost += 1,
                Some(SingleTmdbChange::Changed { .. }) => summary.tmdb_matches_changed += 1,
                None => {}
            }
            match &change.multiple {
                Some(MultiTmdbChange::Gained { .. }) => summary.tmdb_matches_gained += 1,
                Some(MultiTmdbChange::Lost { .. }) => summary.tmdb_matches_lost += 1,
                Some(MultiTmdbChange::Changed { .. }) => summary.tmdb_matches_changed += 1,
                None => {}
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::diff::DiffEngine;
    use crate::compare::VenueReport;
    use crate::listings::{Performance, Showing, TmdbRef};
    use pretty_assertions::assert_eq;

    const NOW: i64 = 1_700_000_000_000;
    const HOUR: i64 = 60 * 60 * 1000;

    fn showing(id: &str, count: usize) -> Showing {
        Showing {
            showing_id: id.to_string(),
            title: format!("Title of {id}"),
            url: format!("https://example.com/{id}"),
            category: "movies".to_string(),
            themoviedb: None,
            themoviedbs: vec![],
            performances: (0..count)
                .map(|i| Performance {
                    time: NOW + HOUR + (i as i64) * 24 * HOUR,
                })
                .collect(),
        }
    }

    #[test]
    fn test_summary_over_mixed_reports() {
        let mut reports = Vec::new();

        reports.push(VenueReport::build(Some(&[showing("new", 1)]), None, NOW));
        reports.push(VenueReport::build(None, Some(&[showing("old", 1)]), NOW));

        // A compared venue losing one showing and gaining a TMDB match.
        let mut latest = vec![showing("keep", 2)];
        latest[0].themoviedb = Some(TmdbRef {
            id: 42,
            title: "Movie X".to_string(),
        });
        let previous = vec![showing("keep", 2), showing("gone", 3)];
        reports.push(VenueReport::build(Some(&latest), Some(&previous), NOW));

        let summary = compute_summary(reports.iter());

        assert_eq!(
            summary,
            Summary {
                total_venues: 3,
                venues_added: 1,
                venues_removed: 1,
                venues_empty: 0,
                showings_added: 0,
                showings_removed: 1,
                future_performances_added: 0,
                future_performances_removed: 3,
                tmdb_matches_gained: 1,
                tmdb_matches_lost: 0,
                tmdb_matches_changed: 0,
            }
        );
    }

    #[test]
    fn test_self_comparison_yields_zero_counters() {
        let both = vec![showing("a", 2), showing("b", 1)];
        let diff = DiffEngine::compare_venue(&both, &both, NOW);
        let report = VenueReport {
            concern: crate::compare::classify(&VenueDiff::Compared(diff.clone())),
            diff: VenueDiff::Compared(diff),
        };

        let summary = compute_summary(std::iter::once(&report));

        assert_eq!(
            summary,
            Summary {
                total_venues: 1,
                ..Summary::default()
            }
        );
    }
}
