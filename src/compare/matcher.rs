//! Performance Matcher
//!
//! Pairs up future performances of the same showing across two releases.
//! Performances have no identity of their own, so "the same slot" is
//! inferred purely by time proximity.

use crate::listings::Performance;

/// Maximum delta at which two performances count as one slot that moved
/// rather than one removed and one added.
pub const RESCHEDULE_TOLERANCE_MS: i64 = 60 * 60 * 1000;

/// Rescheduled pairs with a delta at or above this mark their showing as
/// modified. Deliberately below the match tolerance so the check can fire.
pub const SIGNIFICANT_RESCHEDULE_MS: i64 = 30 * 60 * 1000;

/// A matched pair of performances whose time moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reschedule {
    pub previous: Performance,
    pub latest: Performance,
    /// Signed shift in milliseconds (latest minus previous).
    pub time_delta: i64,
}

/// One-to-one partition of two performance lists. Every performance from
/// either input lands in exactly one of the three buckets (rescheduled
/// pairs count for both sides).
#[derive(Debug, Clone, Default)]
pub struct PerformanceDiff {
    pub rescheduled: Vec<Reschedule>,
    pub added: Vec<Performance>,
    pub removed: Vec<Performance>,
}

/// Match `latest` against `previous`, both already filtered to the future.
///
/// Greedy nearest-time matching, not an optimal assignment: previous
/// performances are processed in their original order, and each claims its
/// closest not-yet-used latest performance. Ties between equally close
/// candidates therefore go to the earlier previous performance - a
/// documented policy, relied on for deterministic output. Matches with a
/// non-zero delta are reported as rescheduled.
pub fn match_performances(latest: &[Performance], previous: &[Performance]) -> PerformanceDiff {
    let mut used_latest = vec![false; latest.len()];
    let mut used_previous = vec![false; previous.len()];
    let mut rescheduled = Vec::new();

    for (pi, prev) in previous.iter().enumerate() {
        let mut best: Option<(usize, i64)> = None;

        for (li, candidate) in latest.iter().enumerate() {
            if used_latest[li] {
                continue;
            }
            let delta = (candidate.time - prev.time).abs();
            if best.map_or(true, |(_, best_delta)| delta < best_delta) {
                best = Some((li, delta));
            }
        }

        if let Some((li, delta)) = best {
            if delta <= RESCHEDULE_TOLERANCE_MS {
                used_latest[li] = true;
                used_previous[pi] = true;

                let time_delta = latest[li].time - prev.time;
                if time_delta != 0 {
                    rescheduled.push(Reschedule {
                        previous: *prev,
                        latest: latest[li],
                        time_delta,
                    });
                }
            }
        }
    }

    let removed = previous
        .iter()
        .zip(&used_previous)
        .filter(|(_, used)| !**used)
        .map(|(p, _)| *p)
        .collect();

    let added = latest
        .iter()
        .zip(&used_latest)
        .filter(|(_, used)| !**used)
        .map(|(p, _)| *p)
        .collect();

    PerformanceDiff {
        rescheduled,
        added,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfs(times: &[i64]) -> Vec<Performance> {
        times.iter().map(|&time| Performance { time }).collect()
    }

    #[test]
    fn test_identical_lists_fully_match() {
        let list = perfs(&[1_000, 2_000, 3_000]);
        let diff = match_performances(&list, &list);

        assert!(diff.rescheduled.is_empty());
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_partition_property() {
        // Every performance from either side appears in exactly one bucket.
        let hour = RESCHEDULE_TOLERANCE_MS;
        let latest = perfs(&[0, hour * 3, hour * 6, hour * 100]);
        let previous = perfs(&[hour / 2, hour * 3, hour * 50]);

        let diff = match_performances(&latest, &previous);

        let matched_pairs = previous.len() - diff.removed.len();
        assert_eq!(matched_pairs, latest.len() - diff.added.len());
        assert_eq!(
            diff.removed.len() + matched_pairs,
            previous.len(),
            "previous side partitions"
        );
        assert_eq!(
            diff.added.len() + matched_pairs,
            latest.len(),
            "latest side partitions"
        );
        // Rescheduled pairs are the matched pairs that actually moved.
        assert!(diff.rescheduled.len() <= matched_pairs);
    }

    #[test]
    fn test_shift_within_tolerance_is_rescheduled() {
        let previous = perfs(&[1_000_000]);
        let latest = perfs(&[1_000_000 + 15 * 60 * 1000]);

        let diff = match_performances(&latest, &previous);

        assert_eq!(diff.rescheduled.len(), 1);
        assert_eq!(diff.rescheduled[0].time_delta, 15 * 60 * 1000);
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_tolerance_boundary_inclusive() {
        // Exactly one hour still matches...
        let previous = perfs(&[0]);
        let latest = perfs(&[RESCHEDULE_TOLERANCE_MS]);
        let diff = match_performances(&latest, &previous);
        assert_eq!(diff.rescheduled.len(), 1);
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());

        // ...one millisecond past it splits into removed + added.
        let latest = perfs(&[RESCHEDULE_TOLERANCE_MS + 1]);
        let diff = match_performances(&latest, &previous);
        assert!(diff.rescheduled.is_empty());
        assert_eq!(diff.added, perfs(&[RESCHEDULE_TOLERANCE_MS + 1]));
        assert_eq!(diff.removed, perfs(&[0]));
    }

    #[test]
    fn test_exact_match_not_reported_as_rescheduled() {
        let previous = perfs(&[5_000, 9_000]);
        let latest = perfs(&[9_000, 5_000]);

        let diff = match_performances(&latest, &previous);

        assert!(diff.rescheduled.is_empty());
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_tie_break_goes_to_first_previous() {
        // Two previous performances are equally close to one latest slot;
        // the first one processed claims it.
        let minute = 60 * 1000;
        let previous = perfs(&[10 * minute, 30 * minute]);
        let latest = perfs(&[20 * minute]);

        let diff = match_performances(&latest, &previous);

        assert_eq!(diff.rescheduled.len(), 1);
        assert_eq!(diff.rescheduled[0].previous.time, 10 * minute);
        assert_eq!(diff.removed, perfs(&[30 * minute]));
        assert!(diff.added.is_empty());
    }

    #[test]
    fn test_each_latest_claimed_once() {
        // Both previous slots are within tolerance of the single latest
        // slot, but matching is one-to-one.
        let minute = 60 * 1000;
        let previous = perfs(&[0, 40 * minute]);
        let latest = perfs(&[20 * minute]);

        let diff = match_performances(&latest, &previous);

        assert_eq!(diff.rescheduled.len(), 1);
        assert_eq!(diff.removed.len(), 1);
        assert!(diff.added.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let diff = match_performances(&[], &[]);
        assert!(diff.rescheduled.is_empty() && diff.added.is_empty() && diff.removed.is_empty());

        let diff = match_performances(&perfs(&[1]), &[]);
        assert_eq!(diff.added, perfs(&[1]));

        let diff = match_performances(&[], &perfs(&[1]));
        assert_eq!(diff.removed, perfs(&[1]));
    }
}
