//! Console Report
//!
//! Renders the grouped, colorized human report: run summary, concerned
//! venues with full detail, unchanged venues collapsed to a single line.

use std::collections::BTreeMap;

use crate::compare::diff::{
    MultiTmdbChange, SingleTmdbChange, TmdbChange, VenueComparison, VenueDiff,
};
use crate::compare::{Concern, VenueReport};
use crate::report::format::{format_tag, format_time, plural};
use crate::report::style::{Style, CYAN, DIM, GREEN, RED, YELLOW};
use crate::report::summary::Summary;

/// Render the full console report. The returned string is printed verbatim
/// by the orchestrator.
pub fn render(
    reports: &BTreeMap<String, VenueReport>,
    summary: &Summary,
    current_tag: &str,
    previous_tag: &str,
    style: Style,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(style.strong(CYAN, "Release Comparison"));
    lines.push(format!("  Current:  {}", format_tag(current_tag)));
    lines.push(format!("  Previous: {}", format_tag(previous_tag)));
    lines.push(String::new());

    lines.push(style.bold("Summary"));
    let venue_extra = if summary.venues_empty > 0 {
        format!(
            ", {}",
            style.paint(YELLOW, &format!("{} empty", summary.venues_empty))
        )
    } else {
        String::new()
    };
    lines.push(format!(
        "  Venues analysed: {} ({}, {}{})",
        summary.total_venues,
        style.non_zero(summary.venues_added, "added", GREEN),
        style.non_zero(summary.venues_removed, "removed", RED),
        venue_extra
    ));
    lines.push(format!(
        "  Showings: {} (all had future performances), {}",
        style.non_zero(summary.showings_removed, "removed", RED),
        style.non_zero(summary.showings_added, "added", GREEN)
    ));
    lines.push(format!(
        "  Future performances: {}, {}",
        style.non_zero(summary.future_performances_removed, "removed", RED),
        style.non_zero(summary.future_performances_added, "added", GREEN)
    ));
    lines.push(format!(
        "  TMDB matches: {}, {}, {}",
        style.non_zero(summary.tmdb_matches_lost, "lost", RED),
        style.non_zero(summary.tmdb_matches_changed, "changed", YELLOW),
        style.non_zero(summary.tmdb_matches_gained, "gained", GREEN)
    ));
    lines.push(String::new());

    let mut concerned: Vec<(&String, &VenueReport)> = reports
        .iter()
        .filter(|(_, r)| r.concern != Concern::Unchanged)
        .collect();
    let mut unchanged: Vec<&String> = reports
        .iter()
        .filter(|(_, r)| r.concern == Concern::Unchanged)
        .map(|(id, _)| id)
        .collect();

    // Most severe first; venue id breaks ties. Map order already sorts the
    // ids, and the sort is stable.
    concerned.sort_by(|a, b| b.1.concern.cmp(&a.1.concern));

    if concerned.is_empty() {
        lines.push(style.paint(GREEN, "No venues with concerns."));
        lines.push(String::new());
    } else {
        lines.push(style.bold(&format!(
            "Venues with concerns ({} of {})",
            concerned.len(),
            summary.total_venues
        )));
        lines.push(String::new());

        for (venue_id, report) in concerned {
            venue_detail(&mut lines, venue_id, report, style);
        }
    }

    if !unchanged.is_empty() {
        unchanged.sort();
        let ids: Vec<&str> = unchanged.iter().map(|s| s.as_str()).collect();
        lines.push(style.paint(
            DIM,
            &format!("Unchanged venues ({}): {}", ids.len(), ids.join(", ")),
        ));
        lines.push(String::new());
    }

    lines.join("\n")
}

fn venue_detail(lines: &mut Vec<String>, venue_id: &str, report: &VenueReport, style: Style) {
    let code = style.concern_color(report.concern);
    let rule_len = 55usize.saturating_sub(venue_id.len());
    lines.push(style.paint(
        code,
        &format!("--- {} {}", venue_id, "\u{2500}".repeat(rule_len)),
    ));

    match &report.diff {
        VenueDiff::Removed => {
            lines.push(format!(
                "    Concern: {}",
                style.strong(RED, &Concern::Critical.to_string())
            ));
            lines.push(format!(
                "    {}",
                style.paint(RED, "Venue file missing from latest release")
            ));
            lines.push(String::new());
        }
        VenueDiff::Added => {
            lines.push(format!("    Concern: {}", style.strong(CYAN, "INFO")));
            lines.push(format!(
                "    {}",
                style.paint(GREEN, "New venue appeared in latest release")
            ));
            lines.push(String::new());
        }
        VenueDiff::Compared(comparison) => {
            lines.push(format!(
                "    Concern: {}",
                style.strong(code, &report.concern.to_string())
            ));
            comparison_detail(lines, comparison, style);
            lines.push(String::new());
        }
    }
}

fn comparison_detail(lines: &mut Vec<String>, comparison: &VenueComparison, style: Style) {
    if comparison.venue_empty {
        lines.push(format!(
            "    {}",
            style.paint(YELLOW, "Venue has 0 showings (was non-zero)")
        ));
    }

    let showings = &comparison.showings;
    let totals = &comparison.future_performances;

    if !showings.removed.is_empty() || !showings.added.is_empty() {
        let mut parts = Vec::new();
        if !showings.removed.is_empty() {
            parts.push(format!(
                "{} (all had future perfs)",
                style.paint(RED, &format!("{} removed", showings.removed.len()))
            ));
        }
        if !showings.added.is_empty() {
            parts.push(style.paint(GREEN, &format!("{} added", showings.added.len())));
        }
        lines.push(format!("    Showings: {}", parts.join(", ")));
    }

    if totals.removed > 0 || totals.added > 0 {
        lines.push(format!(
            "    Future performances: {}, {}",
            style.non_zero(totals.removed, "removed", RED),
            style.non_zero(totals.added, "added", GREEN)
        ));
    }

    if !showings.removed.is_empty() {
        lines.push(String::new());
        lines.push(format!("    {}", style.paint(RED, "Removed showings:")));
        for s in &showings.removed {
            lines.push(format!("      \"{}\" ({})", s.title, s.showing_id));
            lines.push(format!(
                "        Had {} (next: {})",
                plural(s.future_performance_count, "future performance"),
                format_time(s.next_performance)
            ));
            lines.push(format!("        URL: {}", s.url));
        }
    }

    if !showings.added.is_empty() {
        lines.push(String::new());
        lines.push(format!("    {}", style.paint(GREEN, "Added showings:")));
        for s in &showings.added {
            lines.push(format!("      \"{}\" ({})", s.title, s.showing_id));
            let next = s
                .next_performance
                .map(|t| format!(" (next: {})", format_time(t)))
                .unwrap_or_default();
            lines.push(format!(
                "        {}{}",
                plural(s.future_performance_count, "future performance"),
                next
            ));
        }
    }

    // Reschedule-only entries stay out of the listing; they carry no
    // added/removed times to show.
    let listed_modified: Vec<_> = showings
        .modified
        .iter()
        .filter(|s| {
            !s.performances.added.is_empty()
                || !s.performances.removed.is_empty()
                || !s.metadata.is_empty()
        })
        .collect();

    if !listed_modified.is_empty() {
        lines.push(String::new());
        lines.push(format!("    {}", style.paint(YELLOW, "Modified showings:")));
        for s in listed_modified {
            lines.push(format!("      \"{}\" ({})", s.title, s.showing_id));

            if let Some(change) = &s.metadata.title_changed {
                lines.push(format!(
                    "        Title: \"{}\" -> \"{}\"",
                    change.from, change.to
                ));
            }
            if s.metadata.url_changed.is_some() {
                lines.push("        URL changed".to_string());
            }
            if let Some(change) = &s.metadata.category_changed {
                lines.push(format!("        Category: {} -> {}", change.from, change.to));
            }

            let perfs = &s.performances;
            if !perfs.removed.is_empty() || !perfs.added.is_empty() {
                let resched_note = if perfs.rescheduled > 0 {
                    format!(", {} rescheduled", perfs.rescheduled)
                } else {
                    String::new()
                };
                lines.push(format!(
                    "        Future performances: {} -> {} ({}, {}{})",
                    perfs.previous_count,
                    perfs.current_count,
                    style.non_zero(perfs.removed.len(), "removed", RED),
                    style.non_zero(perfs.added.len(), "added", GREEN),
                    resched_note
                ));
                for time in &perfs.removed {
                    lines.push(format!(
                        "          {} {}",
                        style.paint(RED, "-"),
                        format_time(*time)
                    ));
                }
                for time in &perfs.added {
                    lines.push(format!(
                        "          {} {}",
                        style.paint(GREEN, "+"),
                        format_time(*time)
                    ));
                }
                lines.push(format!("        URL: {}", s.url));
            }
        }
    }

    if !comparison.tmdb_changes.is_empty() {
        lines.push(String::new());
        lines.push(format!("    {}", style.paint(CYAN, "TMDB match changes:")));
        for change in &comparison.tmdb_changes {
            tmdb_detail(lines, change, style);
        }
    }
}

fn tmdb_detail(lines: &mut Vec<String>, change: &TmdbChange, style: Style) {
    let multi_label = if change.category == "multiple-movies" {
        " [multiple-movies]"
    } else {
        ""
    };
    lines.push(format!(
        "      \"{}\" ({}){}",
        change.title, change.showing_id, multi_label
    ));

    match &change.single {
        Some(SingleTmdbChange::Gained { current }) => {
            lines.push(format!(
                "        {} \"{}\" (TMDB #{})",
                style.paint(GREEN, "Gained match:"),
                current.title,
                current.id
            ));
        }
        Some(SingleTmdbChange::Lost { previous }) => {
            lines.push(format!(
                "        {} \"{}\" (TMDB #{})",
                style.paint(RED, "Lost match:"),
                previous.title,
                previous.id
            ));
        }
        Some(SingleTmdbChange::Changed { previous, current }) => {
            lines.push(format!(
                "        {} \"{}\" (TMDB #{}) -> \"{}\" (TMDB #{})",
                style.paint(YELLOW, "Match changed:"),
                previous.title,
                previous.id,
                current.title,
                current.id
            ));
        }
        None => {}
    }

    match &change.multiple {
        Some(MultiTmdbChange::Gained { current }) => {
            for t in current {
                lines.push(format!(
                    "        {} \"{}\" (TMDB #{})",
                    style.paint(GREEN, "Match added:"),
                    t.title,
                    t.id
                ));
            }
        }
        Some(MultiTmdbChange::Lost { previous }) => {
            for t in previous {
                lines.push(format!(
                    "        {} \"{}\" (TMDB #{})",
                    style.paint(RED, "Match removed:"),
                    t.title,
                    t.id
                ));
            }
        }
        Some(MultiTmdbChange::Changed { added, removed }) => {
            for t in removed {
                lines.push(format!(
                    "        {} \"{}\" (TMDB #{})",
                    style.paint(RED, "Match removed:"),
                    t.title,
                    t.id
                ));
            }
            for t in added {
                lines.push(format!(
                    "        {} \"{}\" (TMDB #{})",
                    style.paint(GREEN, "Match added:"),
                    t.title,
                    t.id
                ));
            }
        }
        None => {}
    }
}
