//! Venue Diff Engine
//!
//! The core comparison engine that detects changes between two releases of
//! one venue's showings: the added/removed/modified partition, TMDB match
//! changes, and the aggregate performance counts the classifier works from.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::compare::matcher::{self, SIGNIFICANT_RESCHEDULE_MS};
use crate::listings::{Showing, TmdbRef};

/// A showing present only in the previous release. Only recorded when it
/// still had future performances - a lapsed showing disappearing is not a
/// regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedShowing {
    pub showing_id: String,
    pub title: String,
    pub url: String,
    pub future_performance_count: usize,
    /// Earliest future performance that was scheduled.
    pub next_performance: i64,
}

/// A showing present only in the latest release.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedShowing {
    pub showing_id: String,
    pub title: String,
    pub url: String,
    pub future_performance_count: usize,
    /// Earliest future performance, if any are scheduled yet.
    pub next_performance: Option<i64>,
}

/// Before/after values for one changed metadata field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub from: String,
    pub to: String,
}

/// Metadata fields that differ between the two releases of a showing.
/// Absent fields did not change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_changed: Option<FieldChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_changed: Option<FieldChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_changed: Option<FieldChange>,
}

impl MetadataChanges {
    pub fn is_empty(&self) -> bool {
        self.title_changed.is_none() && self.url_changed.is_none() && self.category_changed.is_none()
    }
}

/// Future-performance changes for a showing present in both releases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceChanges {
    pub previous_count: usize,
    pub current_count: usize,
    /// Start times added in the latest release.
    pub added: Vec<i64>,
    /// Start times dropped from the previous release.
    pub removed: Vec<i64>,
    /// Count of matched pairs that moved within tolerance.
    pub rescheduled: usize,
}

/// A showing present in both releases with reportable changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedShowing {
    pub showing_id: String,
    pub title: String,
    pub url: String,
    pub metadata: MetadataChanges,
    pub performances: PerformanceChanges,
}

/// Single-movie match transition for one showing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SingleTmdbChange {
    Gained { current: TmdbRef },
    Lost { previous: TmdbRef },
    Changed { previous: TmdbRef, current: TmdbRef },
}

/// Multi-movie match-list transition for one showing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MultiTmdbChange {
    Gained { current: Vec<TmdbRef> },
    Lost { previous: Vec<TmdbRef> },
    /// Identifier sets differ; symmetric difference recorded.
    Changed {
        added: Vec<TmdbRef>,
        removed: Vec<TmdbRef>,
    },
}

/// TMDB match changes for one showing. Only recorded when at least one of
/// the two classifications is non-null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmdbChange {
    pub showing_id: String,
    pub title: String,
    pub category: String,
    pub single: Option<SingleTmdbChange>,
    pub multiple: Option<MultiTmdbChange>,
}

/// Showing-level partition for one venue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowingChanges {
    pub added: Vec<AddedShowing>,
    pub removed: Vec<RemovedShowing>,
    pub modified: Vec<ModifiedShowing>,
}

/// Aggregate future-performance counts for one venue.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturePerformanceTotals {
    /// All future performances in the previous release, the percentage
    /// baseline for the classifier.
    pub previous_total: usize,
    pub added: usize,
    pub removed: usize,
    pub rescheduled: usize,
}

/// Detailed comparison of a venue present in both releases.
#[derive(Debug, Clone, Default)]
pub struct VenueComparison {
    /// Previous release had showings, latest has none.
    pub venue_empty: bool,
    pub showings: ShowingChanges,
    pub future_performances: FuturePerformanceTotals,
    pub tmdb_changes: Vec<TmdbChange>,
}

/// What happened to a venue between two releases. One discriminant; the
/// venue-level events never carry partial comparison data.
#[derive(Debug, Clone)]
pub enum VenueDiff {
    /// Venue file appeared in the latest release.
    Added,
    /// Venue file missing from the latest release.
    Removed,
    /// Venue present in both releases.
    Compared(VenueComparison),
}

/// The diff engine that compares one venue's showing lists
pub struct DiffEngine;

impl DiffEngine {
    /// Compare a venue's showings across two releases. `now` is the run's
    /// single time anchor; only performances after it participate.
    pub fn compare_venue(latest: &[Showing], previous: &[Showing], now: i64) -> VenueComparison {
        let latest_by_id: HashMap<&str, &Showing> =
            latest.iter().map(|s| (s.showing_id.as_str(), s)).collect();
        let previous_by_id: HashMap<&str, &Showing> =
            previous.iter().map(|s| (s.showing_id.as_str(), s)).collect();

        let mut added_showings = Vec::new();
        let mut removed_showings = Vec::new();
        let mut modified_showings = Vec::new();
        let mut tmdb_changes = Vec::new();

        let mut total_added = 0usize;
        let mut total_removed = 0usize;
        let mut total_rescheduled = 0usize;

        // Removed showings (in previous, not in latest). Input order keeps
        // the output deterministic; the impact sort below is stable.
        for prev in previous {
            if latest_by_id.contains_key(prev.showing_id.as_str()) {
                continue;
            }

            let future = prev.future_performances(now);
            if future.is_empty() {
                continue;
            }

            let next = future.iter().map(|p| p.time).min().unwrap_or_default();
            removed_showings.push(RemovedShowing {
                showing_id: prev.showing_id.clone(),
                title: prev.title.clone(),
                url: prev.url.clone(),
                future_performance_count: future.len(),
                next_performance: next,
            });
            total_removed += future.len();
        }

        // Added showings (in latest, not in previous)
        for curr in latest {
            if previous_by_id.contains_key(curr.showing_id.as_str()) {
                continue;
            }

            let future = curr.future_performances(now);
            added_showings.push(AddedShowing {
                showing_id: curr.showing_id.clone(),
                title: curr.title.clone(),
                url: curr.url.clone(),
                future_performance_count: future.len(),
                next_performance: future.iter().map(|p| p.time).min(),
            });
        }

        // Modified showings (present in both)
        for curr in latest {
            let Some(prev) = previous_by_id.get(curr.showing_id.as_str()) else {
                continue;
            };

            let curr_future = curr.future_performances(now);
            let prev_future = prev.future_performances(now);
            let perf_diff = matcher::match_performances(&curr_future, &prev_future);

            let metadata = Self::compare_metadata(curr, prev);

            let (single, multiple) = Self::compare_tmdb(curr, prev);
            if single.is_some() || multiple.is_some() {
                tmdb_changes.push(TmdbChange {
                    showing_id: curr.showing_id.clone(),
                    title: curr.title.clone(),
                    category: curr.category.clone(),
                    single,
                    multiple,
                });
            }

            let has_perf_changes = !perf_diff.added.is_empty() || !perf_diff.removed.is_empty();
            let has_significant_reschedule = perf_diff
                .rescheduled
                .iter()
                .any(|r| r.time_delta.abs() >= SIGNIFICANT_RESCHEDULE_MS);

            if !metadata.is_empty() || has_perf_changes || has_significant_reschedule {
                modified_showings.push(ModifiedShowing {
                    showing_id: curr.showing_id.clone(),
                    title: curr.title.clone(),
                    url: curr.url.clone(),
                    metadata,
                    performances: PerformanceChanges {
                        previous_count: prev_future.len(),
                        current_count: curr_future.len(),
                        added: perf_diff.added.iter().map(|p| p.time).collect(),
                        removed: perf_diff.removed.iter().map(|p| p.time).collect(),
                        rescheduled: perf_diff.rescheduled.len(),
                    },
                });
            }

            total_added += perf_diff.added.len();
            total_removed += perf_diff.removed.len();
            total_rescheduled += perf_diff.rescheduled.len();
        }

        // Highest-impact removals first
        removed_showings.sort_by(|a, b| b.future_performance_count.cmp(&a.future_performance_count));

        let previous_future_total = previous
            .iter()
            .map(|s| s.future_performances(now).len())
            .sum();

        VenueComparison {
            venue_empty: !previous.is_empty() && latest.is_empty(),
            showings: ShowingChanges {
                added: added_showings,
                removed: removed_showings,
                modified: modified_showings,
            },
            future_performances: FuturePerformanceTotals {
                previous_total: previous_future_total,
                added: total_added,
                removed: total_removed,
                rescheduled: total_rescheduled,
            },
            tmdb_changes,
        }
    }

    fn compare_metadata(curr: &Showing, prev: &Showing) -> MetadataChanges {
        let field_change = |from: &str, to: &str| -> Option<FieldChange> {
            (from != to).then(|| FieldChange {
                from: from.to_string(),
                to: to.to_string(),
            })
        };

        MetadataChanges {
            title_changed: field_change(&prev.title, &curr.title),
            url_changed: field_change(&prev.url, &curr.url),
            category_changed: field_change(&prev.category, &curr.category),
        }
    }

    fn compare_tmdb(
        curr: &Showing,
        prev: &Showing,
    ) -> (Option<SingleTmdbChange>, Option<MultiTmdbChange>) {
        let single = match (&prev.themoviedb, &curr.themoviedb) {
            (None, Some(c)) => Some(SingleTmdbChange::Gained { current: c.clone() }),
            (Some(p), None) => Some(SingleTmdbChange::Lost {
                previous: p.clone(),
            }),
            (Some(p), Some(c)) if p.id != c.id => Some(SingleTmdbChange::Changed {
                previous: p.clone(),
                current: c.clone(),
            }),
            _ => None,
        };

        let prev_ids: HashSet<i64> = prev.themoviedbs.iter().map(|t| t.id).collect();
        let curr_ids: HashSet<i64> = curr.themoviedbs.iter().map(|t| t.id).collect();

        let added_entries: Vec<TmdbRef> = curr
            .themoviedbs
            .iter()
            .filter(|t| !prev_ids.contains(&t.id))
            .cloned()
            .collect();
        let removed_entries: Vec<TmdbRef> = prev
            .themoviedbs
            .iter()
            .filter(|t| !curr_ids.contains(&t.id))
            .cloned()
            .collect();

        let multiple = if prev.themoviedbs.is_empty() && !curr.themoviedbs.is_empty() {
            Some(MultiTmdbChange::Gained {
                current: curr.themoviedbs.clone(),
            })
        } else if !prev.themoviedbs.is_empty() && curr.themoviedbs.is_empty() {
            Some(MultiTmdbChange::Lost {
                previous: prev.themoviedbs.clone(),
            })
        } else if !added_entries.is_empty() || !removed_entries.is_empty() {
            Some(MultiTmdbChange::Changed {
                added: added_entries,
                removed: removed_entries,
            })
        } else {
            None
        };

        (single, multiple)
    }
}
