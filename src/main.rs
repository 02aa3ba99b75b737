//! showgate - release gate for venue listings
//!
//! Compares two releases of the listings dataset venue by venue, classifies
//! each venue's changes, prints a grouped console report, writes a JSON
//! artifact, and fails the build when any venue regressed critically.
//!
//! The pipeline is strictly linear: load both releases, diff each venue in
//! the sorted union, classify, render. The comparison core is pure; the
//! only I/O is the two directory reads and the final artifact write.

mod cli;
mod compare;
mod config;
mod error;
mod listings;
mod loader;
mod report;

use std::collections::BTreeMap;
use std::process::ExitCode;

use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::compare::{Concern, VenueReport};
use crate::config::Settings;
use crate::report::style::RED;
use crate::report::Style;

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse_or_exit();
    let settings = Settings::load();

    match run(&cli, &settings) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("Comparison failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Drive one comparison run. Returns `Ok(true)` on a clean run, `Ok(false)`
/// when at least one venue is CRITICAL.
fn run(cli: &Cli, settings: &Settings) -> anyhow::Result<bool> {
    // One anchor for the whole run; re-reading the clock mid-run would make
    // the future/past split inconsistent between venues.
    let analysed_at = Utc::now();
    let now = analysed_at.timestamp_millis();

    let current = loader::load_release(&cli.current_dir, "current")?;
    let previous = loader::load_release(&cli.previous_dir, "previous")?;

    let venue_ids: std::collections::BTreeSet<&String> =
        current.keys().chain(previous.keys()).collect();
    info!("Comparing {} venues", venue_ids.len());

    let mut reports = BTreeMap::new();
    for venue_id in venue_ids {
        let venue_report = VenueReport::build(
            current.get(venue_id).map(Vec::as_slice),
            previous.get(venue_id).map(Vec::as_slice),
            now,
        );
        reports.insert(venue_id.clone(), venue_report);
    }

    let summary = report::compute_summary(reports.values());
    let style = Style::new(settings.output.color);

    println!(
        "{}",
        report::human::render(&reports, &summary, &cli.current_tag, &cli.previous_tag, style)
    );

    let artifact = report::json::build(
        &reports,
        &summary,
        &cli.current_tag,
        &cli.previous_tag,
        analysed_at,
    );
    let path = report::json::write(&artifact, &settings.output.dir, &cli.current_tag)?;
    info!("JSON log written to {}", path.display());

    let has_critical = reports.values().any(|r| r.concern == Concern::Critical);
    if has_critical {
        println!(
            "{}",
            style.strong(RED, "Exiting with code 1 due to CRITICAL findings.")
        );
    }
    Ok(!has_critical)
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).compact())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use std::fs;
    use std::path::Path;

    // Far enough in the future that every fixture performance stays ahead
    // of the run's `now` anchor.
    const FUTURE_MS: i64 = 4_102_444_800_000;

    fn write_venue(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn venue_json() -> String {
        format!(
            r#"[{{"showingId": "s1", "title": "T", "url": "u", "category": "movies",
                 "performances": [{{"time": {FUTURE_MS}}}]}}]"#
        )
    }

    fn cli_for(current: &Path, previous: &Path) -> Cli {
        Cli {
            current_dir: current.to_path_buf(),
            previous_dir: previous.to_path_buf(),
            current_tag: "20250801.063000".to_string(),
            previous_tag: "20250731.063000".to_string(),
        }
    }

    fn settings_for(output: &Path) -> Settings {
        Settings {
            output: OutputConfig {
                dir: output.to_path_buf(),
                color: false,
            },
        }
    }

    #[test]
    fn test_self_comparison_passes_with_zero_counters() {
        let root = tempfile::tempdir().unwrap();
        let release = root.path().join("release");
        fs::create_dir(&release).unwrap();
        write_venue(&release, "venue-a", &venue_json());

        let output = root.path().join("out");
        let clean = run(&cli_for(&release, &release), &settings_for(&output)).unwrap();
        assert!(clean);

        let artifact: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(output.join("comparison-20250801.063000.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(artifact["summary"]["totalVenues"], 1);
        assert_eq!(artifact["summary"]["showingsRemoved"], 0);
        assert_eq!(artifact["summary"]["futurePerformancesRemoved"], 0);
        assert_eq!(artifact["venues"]["venue-a"]["concern"], "UNCHANGED");
    }

    #[test]
    fn test_removed_venue_fails_the_gate() {
        let root = tempfile::tempdir().unwrap();
        let current = root.path().join("current");
        let previous = root.path().join("previous");
        fs::create_dir(&current).unwrap();
        fs::create_dir(&previous).unwrap();
        write_venue(&previous, "venue-x", &venue_json());

        let output = root.path().join("out");
        let clean = run(&cli_for(&current, &previous), &settings_for(&output)).unwrap();
        assert!(!clean);

        let artifact: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(output.join("comparison-20250801.063000.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(artifact["venues"]["venue-x"]["concern"], "CRITICAL");
        assert_eq!(artifact["venues"]["venue-x"]["venueRemoved"], true);
    }

    #[test]
    fn test_missing_release_dir_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let previous = root.path().join("previous");
        fs::create_dir(&previous).unwrap();

        let output = root.path().join("out");
        let missing = root.path().join("no-such-dir");
        let result = run(&cli_for(&missing, &previous), &settings_for(&output));

        assert!(result.is_err());
        // No partial artifact on a fatal load error.
        assert!(!output.exists());
    }
}
