//! JSON Artifact
//!
//! Machine-readable comparison log written alongside the console report,
//! consumed by the release dashboard and by later runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::compare::diff::{FuturePerformanceTotals, ShowingChanges, TmdbChange, VenueDiff};
use crate::compare::{Concern, VenueReport};
use crate::error::{AppError, AppResult};
use crate::report::summary::Summary;

/// Run metadata for the artifact header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadata {
    pub current_release: String,
    pub previous_release: String,
    pub analysed_at: DateTime<Utc>,
    pub venue_count: usize,
}

/// TMDB changes grouped by transition kind. A change with both a single and
/// a multiple classification lands in both groups, one per classification.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedTmdbChanges {
    pub gained: Vec<TmdbChange>,
    pub lost: Vec<TmdbChange>,
    pub changed: Vec<TmdbChange>,
}

/// Per-venue artifact entry. Venue-level events carry only their flag; a
/// compared venue carries the full diff.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum VenueEntry {
    #[serde(rename_all = "camelCase")]
    Added { concern: Concern, venue_added: bool },
    #[serde(rename_all = "camelCase")]
    Removed { concern: Concern, venue_removed: bool },
    #[serde(rename_all = "camelCase")]
    Compared {
        concern: Concern,
        venue_empty: bool,
        showings: ShowingChanges,
        future_performances: FuturePerformanceTotals,
        tmdb_changes: GroupedTmdbChanges,
    },
}

/// The complete artifact document.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub metadata: ArtifactMetadata,
    pub summary: Summary,
    pub venues: BTreeMap<String, VenueEntry>,
}

/// Build the artifact document. Pure; `analysed_at` comes from the
/// orchestrator so the document is reproducible under test.
pub fn build(
    reports: &BTreeMap<String, VenueReport>,
    summary: &Summary,
    current_tag: &str,
    previous_tag: &str,
    analysed_at: DateTime<Utc>,
) -> Artifact {
    let venues = reports
        .iter()
        .map(|(venue_id, report)| (venue_id.clone(), venue_entry(report)))
        .collect();

    Artifact {
        metadata: ArtifactMetadata {
            current_release: current_tag.to_string(),
            previous_release: previous_tag.to_string(),
            analysed_at,
            venue_count: summary.total_venues,
        },
        summary: *summary,
        venues,
    }
}

fn venue_entry(report: &VenueReport) -> VenueEntry {
    match &report.diff {
        VenueDiff::Added => VenueEntry::Added {
            concern: report.concern,
            venue_added: true,
        },
        VenueDiff::Removed => VenueEntry::Removed {
            concern: report.concern,
            venue_removed: true,
        },
        VenueDiff::Compared(comparison) => {
            let mut grouped = GroupedTmdbChanges::default();
            for change in &comparison.tmdb_changes {
                if let Some(single) = &change.single {
                    use crate::compare::diff::SingleTmdbChange::*;
                    match single {
                        Gained { .. } => grouped.gained.push(change.clone()),
                        Lost { .. } => grouped.lost.push(change.clone()),
                        Changed { .. } => grouped.changed.push(change.clone()),
                    }
                }
                if let Some(multiple) = &change.multiple {
                    use crate::compare::diff::MultiTmdbChange::*;
                    match multiple {
                        Gained { .. } => grouped.gained.push(change.clone()),
                        Lost { .. } => grouped.lost.push(change.clone()),
                        Changed { .. } => grouped.changed.push(change.clone()),
                    }
                }
            }

            VenueEntry::Compared {
                concern: report.concern,
                venue_empty: comparison.venue_empty,
                showings: comparison.showings.clone(),
                future_performances: comparison.future_performances,
                tmdb_changes: grouped,
            }
        }
    }
}

/// Write the artifact under `output_dir`, creating the directory if absent.
/// Returns the path written.
pub fn write(artifact: &Artifact, output_dir: &Path, current_tag: &str) -> AppResult<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| AppError::ArtifactWrite {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(format!("comparison-{current_tag}.json"));
    let contents = serde_json::to_string_pretty(artifact).map_err(AppError::ArtifactEncode)?;
    fs::write(&path, contents).map_err(|source| AppError::ArtifactWrite {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
