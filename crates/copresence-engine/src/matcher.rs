//! Two-pointer proximity matcher for a pair of sorted event sequences.
//!
//! Both inputs are pre-sorted by timestamp (loader invariant). Because the
//! time threshold defines a symmetric window over two monotone sequences,
//! total comparisons are bounded by the events actually within reach of each
//! other rather than the full cross product, which keeps large timelines
//! (10^4-10^5 events) tractable.

use copresence_core::geo;
use copresence_core::models::{Event, Match, Thresholds};

/// All matches for one pair of timelines, plus the running minimum.
#[derive(Debug, Clone)]
pub struct PairMatches {
    /// Every event pair within both thresholds, in left-iteration order.
    pub matches: Vec<Match>,
    /// Minimum-distance match; ties keep the first encountered.
    pub closest: Option<Match>,
}

/// Sweep two chronologically sorted event sequences for proximity events.
///
/// Both thresholds are inclusive: a pair exactly at the time window or
/// exactly at the distance threshold is a match.
pub fn find_matches(left: &[Event], right: &[Event], thresholds: &Thresholds) -> PairMatches {
    let mut matches: Vec<Match> = Vec::new();
    let mut closest: Option<Match> = None;
    let window = thresholds.time_window;

    let mut i = 0;
    let mut j = 0;
    while i < left.len() && j < right.len() {
        let diff = left[i].timestamp - right[j].timestamp;
        if diff > window {
            // right[j] is too old for left[i], and for every later left event.
            j += 1;
            continue;
        }
        if diff < -window {
            // Everything remaining on the right is too far in the future.
            i += 1;
            continue;
        }

        // Scan the candidate window; right stays sorted, so the first
        // candidate past the window ends the scan.
        let mut k = j;
        while k < right.len() {
            let delta = (left[i].timestamp - right[k].timestamp).abs();
            if delta > window {
                break;
            }
            let distance = geo::haversine_distance(
                left[i].latitude,
                left[i].longitude,
                right[k].latitude,
                right[k].longitude,
            );
            if distance <= thresholds.distance_meters {
                let found = Match {
                    left: left[i],
                    right: right[k],
                    time_delta_seconds: delta.num_milliseconds() as f64 / 1000.0,
                    distance_meters: distance,
                };
                // Strict < keeps the first match on ties.
                if closest.map_or(true, |c| found.distance_meters < c.distance_meters) {
                    closest = Some(found);
                }
                matches.push(found);
            }
            k += 1;
        }
        i += 1;
    }

    PairMatches { matches, closest }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn event(offset_secs: i64, lat: f64, lon: f64) -> Event {
        Event {
            timestamp: base() + TimeDelta::seconds(offset_secs),
            latitude: lat,
            longitude: lon,
        }
    }

    fn thresholds(minutes: i64, meters: f64) -> Thresholds {
        Thresholds {
            time_window: TimeDelta::minutes(minutes),
            distance_meters: meters,
        }
    }

    /// Reference implementation: full O(n*m) scan with the same inclusive
    /// comparisons, in the same iteration order.
    fn brute_force(left: &[Event], right: &[Event], t: &Thresholds) -> Vec<Match> {
        let mut found = Vec::new();
        for a in left {
            for b in right {
                let delta = (a.timestamp - b.timestamp).abs();
                if delta > t.time_window {
                    continue;
                }
                let distance =
                    geo::haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude);
                if distance <= t.distance_meters {
                    found.push(Match {
                        left: *a,
                        right: *b,
                        time_delta_seconds: delta.num_milliseconds() as f64 / 1000.0,
                        distance_meters: distance,
                    });
                }
            }
        }
        found
    }

    fn xorshift(state: &mut u64) -> u64 {
        let mut x = *state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        *state = x;
        x
    }

    /// Sorted-by-construction timeline with pseudo-random gaps and jitter.
    fn random_timeline(seed: u64, len: usize) -> Vec<Event> {
        let mut state = seed;
        let mut clock = 0i64;
        let mut events = Vec::with_capacity(len);
        for _ in 0..len {
            clock += (xorshift(&mut state) % 90) as i64;
            let lat = (xorshift(&mut state) % 2_000) as f64 / 1_000_000.0;
            let lon = (xorshift(&mut state) % 2_000) as f64 / 1_000_000.0;
            events.push(event(clock, lat, lon));
        }
        events
    }

    // ── Scenarios from the analysis contract ──────────────────────────────

    #[test]
    fn test_single_match_within_both_thresholds() {
        let left = vec![event(0, 0.0, 0.0)];
        let right = vec![event(60, 0.0, 0.0005)]; // ~55.6 m away
        let result = find_matches(&left, &right, &thresholds(2, 100.0));

        assert_eq!(result.matches.len(), 1);
        let m = result.closest.unwrap();
        assert_eq!(m.time_delta_seconds, 60.0);
        assert!((m.distance_meters - 55.6).abs() < 0.1, "{}", m.distance_meters);
    }

    #[test]
    fn test_distance_threshold_excludes_far_pair() {
        let left = vec![event(0, 0.0, 0.0)];
        let right = vec![event(60, 0.0, 0.0005)];
        let result = find_matches(&left, &right, &thresholds(2, 50.0));
        assert!(result.matches.is_empty());
        assert!(result.closest.is_none());
    }

    #[test]
    fn test_empty_timelines_yield_no_matches() {
        let some = vec![event(0, 0.0, 0.0)];
        assert!(find_matches(&[], &some, &thresholds(2, 100.0)).matches.is_empty());
        assert!(find_matches(&some, &[], &thresholds(2, 100.0)).matches.is_empty());
        assert!(find_matches(&[], &[], &thresholds(2, 100.0)).matches.is_empty());
    }

    // ── Boundary inclusivity ───────────────────────────────────────────────

    #[test]
    fn test_time_boundary_is_inclusive() {
        let left = vec![event(0, 0.0, 0.0)];
        let at_window = vec![event(120, 0.0, 0.0)];
        let past_window = vec![event(121, 0.0, 0.0)];

        let t = thresholds(2, 100.0);
        assert_eq!(find_matches(&left, &at_window, &t).matches.len(), 1);
        assert_eq!(find_matches(&left, &past_window, &t).matches.len(), 0);
    }

    #[test]
    fn test_distance_boundary_is_inclusive() {
        let left = vec![event(0, 0.0, 0.0)];
        let right = vec![event(0, 0.0, 0.0005)];
        let exact = geo::haversine_distance(0.0, 0.0, 0.0, 0.0005);

        let at = Thresholds {
            time_window: TimeDelta::minutes(2),
            distance_meters: exact,
        };
        let below = Thresholds {
            time_window: TimeDelta::minutes(2),
            distance_meters: exact - 0.01,
        };
        assert_eq!(find_matches(&left, &right, &at).matches.len(), 1);
        assert_eq!(find_matches(&left, &right, &below).matches.len(), 0);
    }

    // ── Correctness equivalence ────────────────────────────────────────────

    #[test]
    fn test_sweep_equals_brute_force_on_random_timelines() {
        for seed in 1..=8u64 {
            let left = random_timeline(seed, 120);
            let right = random_timeline(seed.wrapping_mul(0x9E3779B9), 150);
            let t = thresholds(2, 100.0);

            let swept = find_matches(&left, &right, &t);
            let reference = brute_force(&left, &right, &t);
            assert_eq!(swept.matches, reference, "seed {seed}");
        }
    }

    #[test]
    fn test_timestamp_ties_counted_exactly_once() {
        // Two left events and two right events all at the same instant:
        // every cross pair appears once, none twice.
        let left = vec![event(0, 0.0, 0.0), event(0, 0.0, 0.0001)];
        let right = vec![event(0, 0.0, 0.0002), event(0, 0.0, 0.0003)];
        let result = find_matches(&left, &right, &thresholds(2, 100.0));
        assert_eq!(result.matches.len(), 4);
    }

    #[test]
    fn test_idempotent_over_same_inputs() {
        let left = random_timeline(42, 80);
        let right = random_timeline(77, 90);
        let t = thresholds(2, 100.0);

        let first = find_matches(&left, &right, &t);
        let second = find_matches(&left, &right, &t);
        assert_eq!(first.matches, second.matches);
        assert_eq!(first.closest, second.closest);
    }

    // ── Closest tracking ───────────────────────────────────────────────────

    #[test]
    fn test_closest_is_minimum_distance() {
        let left = vec![event(0, 0.0, 0.0)];
        let right = vec![event(10, 0.0, 0.0005), event(20, 0.0, 0.0001)];
        let result = find_matches(&left, &right, &thresholds(2, 100.0));
        assert_eq!(result.matches.len(), 2);
        let closest = result.closest.unwrap();
        assert_eq!(closest.right.longitude, 0.0001);
    }

    #[test]
    fn test_closest_tie_keeps_first_encountered() {
        // Both right events sit at the exact same coordinates, so both
        // matches have identical distance; the earlier one must win.
        let left = vec![event(0, 0.0, 0.0)];
        let right = vec![event(10, 0.0, 0.0002), event(30, 0.0, 0.0002)];
        let result = find_matches(&left, &right, &thresholds(2, 100.0));
        let closest = result.closest.unwrap();
        assert_eq!(closest.time_delta_seconds, 10.0);
    }
}
