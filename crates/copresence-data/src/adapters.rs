//! Format adapters, one per known location-history export schema.
//!
//! Real exports vary: some nest events under differently-named top-level
//! keys, some encode coordinates as separate integers scaled by 1e7, others
//! as a single comma-joined string; timestamps appear as ISO 8601 strings or
//! epoch milliseconds. Each adapter owns exactly one concrete schema and
//! yields canonical [`Event`] values: float degrees, UTC instants.

use copresence_core::models::Event;
use copresence_core::time_utils;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

// ── Adapter trait and selection ────────────────────────────────────────────────

/// A parser for one concrete export schema.
pub trait FormatAdapter: Sync {
    /// Short identifier used in log output.
    fn name(&self) -> &'static str;

    /// Whether the document carries this schema's structural markers.
    ///
    /// Detection must be strict: an adapter never coerces a structurally
    /// different document. Ambiguity is resolved by the selection order in
    /// [`all_adapters`], not by adapters guessing.
    fn detect(&self, doc: &Value) -> bool;

    /// Extract all events from a recognised document.
    ///
    /// Individual malformed records are skipped, matching how real exports
    /// mix usable and broken entries.
    fn extract(&self, doc: &Value) -> Vec<Event>;
}

/// The known adapters in fixed priority order.
pub fn all_adapters() -> &'static [&'static dyn FormatAdapter] {
    &[&SemanticSegments, &VisitArray, &RawLocations]
}

/// Return the first adapter whose structural markers are present.
pub fn select(doc: &Value) -> Option<&'static dyn FormatAdapter> {
    all_adapters().iter().copied().find(|a| a.detect(doc))
}

// ── Coordinate strings ─────────────────────────────────────────────────────────

/// Compiled once; this runs per track point on large timelines.
fn coordinate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-+]?\d+\.\d+").expect("regex is valid"))
}

/// Extract a `(latitude, longitude)` pair from a coordinate string such as
/// `"geo:55.676100, 12.568300"` or `"55.6761°, 12.5683°"`.
///
/// The string must contain exactly two signed decimal numbers.
fn parse_coordinate_pair(text: &str) -> Option<(f64, f64)> {
    let mut numbers = coordinate_regex()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok());
    let latitude = numbers.next()?;
    let longitude = numbers.next()?;
    if numbers.next().is_some() {
        return None;
    }
    Some((latitude, longitude))
}

/// Build an event from an ISO timestamp string and a coordinate string.
fn event_from_strings(time: &str, location: &str) -> Option<Event> {
    let timestamp = time_utils::parse_iso(time)?;
    let (latitude, longitude) = parse_coordinate_pair(location)?;
    Some(Event {
        timestamp,
        latitude,
        longitude,
    })
}

/// Extract an event from a visit-style record: `startTime` plus
/// `visit.topCandidate.placeLocation`.
fn visit_event(item: &Value) -> Option<Event> {
    let time = item.get("startTime")?.as_str()?;
    let location = item
        .get("visit")?
        .get("topCandidate")?
        .get("placeLocation")?
        .as_str()?;
    event_from_strings(time, location)
}

// ── Semantic segments ──────────────────────────────────────────────────────────

/// Exports with a top-level `semanticSegments` array.
///
/// Each segment carries either a `timelinePath` (dense track points with an
/// ISO `time` and a coordinate `point` string) or a `visit` with a start
/// time and a candidate place location.
pub struct SemanticSegments;

impl FormatAdapter for SemanticSegments {
    fn name(&self) -> &'static str {
        "semantic-segments"
    }

    fn detect(&self, doc: &Value) -> bool {
        doc.get("semanticSegments").is_some_and(Value::is_array)
    }

    fn extract(&self, doc: &Value) -> Vec<Event> {
        let Some(segments) = doc.get("semanticSegments").and_then(Value::as_array) else {
            return Vec::new();
        };

        let mut events = Vec::new();
        for segment in segments {
            let path = segment
                .get("timelinePath")
                .and_then(Value::as_array)
                .filter(|p| !p.is_empty());

            if let Some(path) = path {
                for point in path {
                    let parsed = point
                        .get("time")
                        .and_then(Value::as_str)
                        .zip(point.get("point").and_then(Value::as_str))
                        .and_then(|(time, location)| event_from_strings(time, location));
                    match parsed {
                        Some(event) => events.push(event),
                        None => debug!("skipping malformed timelinePath point: {point}"),
                    }
                }
            } else if segment.get("visit").is_some() {
                match visit_event(segment) {
                    Some(event) => events.push(event),
                    None => debug!("skipping malformed visit segment"),
                }
            }
        }
        events
    }
}

// ── Visit array ────────────────────────────────────────────────────────────────

/// Exports that are a bare top-level array of visit records.
pub struct VisitArray;

impl FormatAdapter for VisitArray {
    fn name(&self) -> &'static str {
        "visit-array"
    }

    fn detect(&self, doc: &Value) -> bool {
        // Any top-level array: neither other schema is array-rooted, and
        // real exports mix malformed records in at any position, so
        // record-level validation belongs to extract, not detection.
        doc.is_array()
    }

    fn extract(&self, doc: &Value) -> Vec<Event> {
        let Some(items) = doc.as_array() else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| {
                let event = visit_event(item);
                if event.is_none() {
                    debug!("skipping malformed visit record");
                }
                event
            })
            .collect()
    }
}

// ── Raw locations ──────────────────────────────────────────────────────────────

/// Exports with a top-level `locations` array of raw samples.
///
/// Coordinates are `latitudeE7`/`longitudeE7` integers scaled by 1e7; the
/// timestamp is either an ISO `timestamp` or an epoch-milliseconds
/// `timestampMs` (string or number).
pub struct RawLocations;

const E7_SCALE: f64 = 1e7;

impl FormatAdapter for RawLocations {
    fn name(&self) -> &'static str {
        "raw-locations"
    }

    fn detect(&self, doc: &Value) -> bool {
        doc.get("locations").is_some_and(Value::is_array)
    }

    fn extract(&self, doc: &Value) -> Vec<Event> {
        let Some(locations) = doc.get("locations").and_then(Value::as_array) else {
            return Vec::new();
        };
        locations
            .iter()
            .filter_map(|loc| {
                let event = raw_location_event(loc);
                if event.is_none() {
                    debug!("skipping malformed location record");
                }
                event
            })
            .collect()
    }
}

fn raw_location_event(loc: &Value) -> Option<Event> {
    let timestamp = loc
        .get("timestamp")
        .and_then(Value::as_str)
        .and_then(time_utils::parse_iso)
        .or_else(|| loc.get("timestampMs").and_then(time_utils::parse_epoch_millis))?;
    let latitude = loc.get("latitudeE7").and_then(Value::as_f64)? / E7_SCALE;
    let longitude = loc.get("longitudeE7").and_then(Value::as_f64)? / E7_SCALE;
    Some(Event {
        timestamp,
        latitude,
        longitude,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
