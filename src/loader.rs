//! Release Loading
//!
//! Reads a release directory into an ordered venue id -> showings mapping.
//! Venue ids are the file names, so the two releases of a venue line up by
//! name and a file present on one side only reads as a venue-level event.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::listings::Showing;

/// One full release capture: venue id -> parsed showings. Ordered so every
/// downstream traversal is deterministic.
pub type Release = BTreeMap<String, Vec<Showing>>;

/// Load every venue file in `dir`. A missing directory or a malformed file
/// aborts the run: partial results would silently understate regressions.
pub fn load_release(dir: &Path, label: &str) -> AppResult<Release> {
    info!("Loading {} release from {}", label, dir.display());

    let entries = fs::read_dir(dir).map_err(|source| AppError::ReleaseDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut venues = Release::new();
    for entry in entries {
        let entry = entry.map_err(|source| AppError::ReleaseDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let venue_id = entry.file_name().to_string_lossy().into_owned();
        let contents = fs::read_to_string(&path).map_err(|source| AppError::VenueRead {
            path: path.clone(),
            source,
        })?;
        let showings: Vec<Showing> =
            serde_json::from_str(&contents).map_err(|source| AppError::VenueParse {
                path: path.clone(),
                source,
            })?;

        venues.insert(venue_id, showings);
    }

    info!("Found {} venue files", venues.len());
    Ok(venues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_venue(dir: &Path, name: &str, contents: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_loads_venues_keyed_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        write_venue(
            dir.path(),
            "odeon-leicester-square",
            r#"[{"showingId": "s1", "title": "T", "url": "u", "category": "movies",
                 "performances": [{"time": 1}]}]"#,
        );
        write_venue(dir.path(), "prince-charles", "[]");

        let release = load_release(dir.path(), "current").unwrap();

        assert_eq!(release.len(), 2);
        assert_eq!(release["odeon-leicester-square"].len(), 1);
        assert_eq!(release["odeon-leicester-square"][0].showing_id, "s1");
        assert!(release["prince-charles"].is_empty());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-release");

        let err = load_release(&missing, "current").unwrap_err();
        assert!(matches!(err, AppError::ReleaseDir { .. }));
    }

    #[test]
    fn test_malformed_venue_file_is_fatal_with_path() {
        let dir = tempfile::tempdir().unwrap();
        write_venue(dir.path(), "good", "[]");
        write_venue(dir.path(), "broken", "{not json");

        let err = load_release(dir.path(), "previous").unwrap_err();
        match err {
            AppError::VenueParse { path, .. } => {
                assert!(path.ends_with("broken"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
