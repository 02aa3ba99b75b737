//! Listings Data Model
//!
//! Serde types for the per-venue release files produced by the scraping
//! pipeline. A release is a directory with one JSON file per venue, each
//! holding an array of showings.

use serde::{Deserialize, Serialize};

/// One scheduled start time belonging to a showing.
///
/// Performances carry no identity of their own across releases; the matcher
/// pairs them up by time proximity. Upstream producers attach extra fields
/// (screen, booking link) which this engine ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    /// Scheduled start instant, epoch milliseconds.
    pub time: i64,
}

/// A movie-catalog match entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmdbRef {
    pub id: i64,
    pub title: String,
}

/// A scheduled program item at a venue.
///
/// `showing_id` is the only field with stable identity across releases; two
/// showings with the same id are the same showing even if everything else
/// differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showing {
    pub showing_id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    /// Single-movie match, when the showing maps to exactly one film.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themoviedb: Option<TmdbRef>,
    /// Multi-movie matches (double bills, festivals).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themoviedbs: Vec<TmdbRef>,
    #[serde(default)]
    pub performances: Vec<Performance>,
}

impl Showing {
    /// Performances strictly after `now`. Past performances never take part
    /// in comparison or totals.
    pub fn future_performances(&self, now: i64) -> Vec<Performance> {
        self.performances
            .iter()
            .copied()
            .filter(|p| p.time > now)
            .collect()
    }
}
