use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde_json::Value;

// ── Timestamp parsing ──────────────────────────────────────────────────────────

/// Parse an ISO 8601 / RFC 3339 timestamp string into a UTC [`DateTime`].
///
/// Handles the common `Z`-suffix form and any fixed UTC offset. Naive
/// timestamps without timezone information are interpreted as UTC.
/// Returns `None` for empty strings or unrecognised formats.
pub fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    // Replace trailing 'Z' with '+00:00' for RFC 3339 compatibility.
    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try a series of common strftime-like patterns without offsets.
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}

/// Parse an epoch-milliseconds value (JSON string or number) into a UTC
/// [`DateTime`].
pub fn parse_epoch_millis(value: &Value) -> Option<DateTime<Utc>> {
    let millis = match value {
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        _ => return None,
    };
    DateTime::from_timestamp_millis(millis)
}

// ── Offset estimation ──────────────────────────────────────────────────────────

/// Estimate a fixed UTC offset from a longitude, 15 degrees per hour.
///
/// Used for local-time display when no explicit timezone is configured.
/// The estimate ignores political timezone boundaries; it is a display
/// fallback, not a timezone database lookup.
pub fn estimate_utc_offset(longitude: f64) -> FixedOffset {
    let hours = (longitude / 15.0).round() as i32;
    let seconds = hours.clamp(-12, 14) * 3600;
    // Clamped to [-12h, +14h], always within FixedOffset's valid range.
    FixedOffset::east_opt(seconds)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"))
}
