use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped coordinate read from a timeline export.
///
/// Timestamps are normalised to UTC during parsing; local display only
/// happens in the report layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// UTC instant at which the coordinate was recorded.
    pub timestamp: DateTime<Utc>,
    /// Latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180].
    pub longitude: f64,
}

/// One input file's events, normalised and sorted chronologically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    /// Source label, normally the originating file name.
    pub label: String,
    /// Events sorted non-decreasing by timestamp (loader invariant).
    pub events: Vec<Event>,
}

/// A proximity event: two coordinates from different timelines within both
/// the time and distance thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Event from the first timeline of the pair.
    pub left: Event,
    /// Event from the second timeline of the pair.
    pub right: Event,
    /// Absolute time difference between the two events, in seconds.
    pub time_delta_seconds: f64,
    /// Great-circle distance between the two coordinates, in meters.
    pub distance_meters: f64,
}

/// Per-timeline-pair comparison summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairResult {
    /// Label of the first timeline in the pair.
    pub left_label: String,
    /// Label of the second timeline in the pair.
    pub right_label: String,
    /// Number of matches found for this pair.
    pub match_count: usize,
    /// The pair's own minimum-distance match, if any.
    pub closest: Option<Match>,
}

/// The single closest match across all pairs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GlobalClosest {
    /// Index into [`GlobalResult::pairs`] identifying the originating pair.
    pub pair_index: usize,
    /// The minimum-distance match itself.
    pub matched: Match,
}

/// Aggregated outcome of comparing every unordered pair of timelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalResult {
    /// Per-pair summaries in pair-enumeration order (input-file order).
    pub pairs: Vec<PairResult>,
    /// Total number of matches across all pairs.
    pub total_matches: usize,
    /// Globally closest match; ties resolve to the first pair enumerated.
    pub closest: Option<GlobalClosest>,
}

impl GlobalResult {
    /// An empty result, used when fewer than two timelines loaded.
    pub fn empty() -> Self {
        Self {
            pairs: Vec::new(),
            total_matches: 0,
            closest: None,
        }
    }

    /// The pair summary that produced the globally closest match.
    pub fn closest_pair(&self) -> Option<&PairResult> {
        self.closest.as_ref().map(|c| &self.pairs[c.pair_index])
    }
}

/// Matching thresholds, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Maximum absolute time difference between two events.
    pub time_window: TimeDelta,
    /// Maximum great-circle distance between two events, in meters.
    pub distance_meters: f64,
}

/// Inclusive year bounds applied by the timeline loader.
///
/// An omitted bound leaves that side unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearFilter {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearFilter {
    /// Whether the (UTC) year of `timestamp` falls within the bounds.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        let year = timestamp.year();
        if let Some(start) = self.start {
            if year < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if year > end {
                return false;
            }
        }
        true
    }
}
