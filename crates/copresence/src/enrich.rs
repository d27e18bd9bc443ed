//! Context enrichment for the globally closest match.
//!
//! Resolves a human-readable place name via the Nominatim reverse-geocode
//! service and renders both event timestamps in local time. Every failure
//! here degrades the report (place omitted, offset estimated) rather than
//! aborting: the comparison result is already complete by this point.

use std::time::Duration;

use chrono_tz::Tz;
use copresence_core::models::{Event, Match};
use copresence_core::settings::RunConfig;
use copresence_core::time_utils;
use tracing::warn;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const LOOKUP_ATTEMPTS: u32 = 3;
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_PAUSE: Duration = Duration::from_secs(2);

/// Resolved context for the closest match, consumed by the report layer.
#[derive(Debug, Clone)]
pub struct Enrichment {
    /// Reverse-geocoded place name, `None` when unavailable.
    pub place_name: Option<String>,
    /// Left event's timestamp rendered in local time.
    pub left_local: String,
    /// Right event's timestamp rendered in local time.
    pub right_local: String,
}

/// Enrich the closest match with a place name and local timestamps.
pub async fn enrich(closest: &Match, config: &RunConfig) -> Enrichment {
    let place_name = if config.offline {
        None
    } else {
        lookup_place(closest.left.latitude, closest.left.longitude).await
    };

    Enrichment {
        place_name,
        left_local: local_display(&closest.left, config.display_tz),
        right_local: local_display(&closest.right, config.display_tz),
    }
}

/// Render an event's timestamp in local time.
///
/// Uses the configured named timezone when present, otherwise a fixed
/// offset estimated from the event's own longitude.
fn local_display(event: &Event, tz: Option<Tz>) -> String {
    match tz {
        Some(tz) => event
            .timestamp
            .with_timezone(&tz)
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string(),
        None => {
            let offset = time_utils::estimate_utc_offset(event.longitude);
            event
                .timestamp
                .with_timezone(&offset)
                .format("%Y-%m-%d %H:%M:%S UTC%:z (estimated)")
                .to_string()
        }
    }
}

/// Reverse-geocode a coordinate, retrying transient failures.
async fn lookup_place(latitude: f64, longitude: f64) -> Option<String> {
    let client = match reqwest::Client::builder()
        .timeout(LOOKUP_TIMEOUT)
        .user_agent(concat!("copresence/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            warn!("could not build HTTP client for place lookup: {err}");
            return None;
        }
    };

    for attempt in 1..=LOOKUP_ATTEMPTS {
        match try_lookup(&client, latitude, longitude).await {
            Ok(name) => return Some(name),
            Err(err) => {
                warn!("place lookup attempt {attempt}/{LOOKUP_ATTEMPTS} failed: {err}");
                if attempt < LOOKUP_ATTEMPTS {
                    tokio::time::sleep(RETRY_PAUSE).await;
                }
            }
        }
    }
    None
}

async fn try_lookup(
    client: &reqwest::Client,
    latitude: f64,
    longitude: f64,
) -> anyhow::Result<String> {
    let response = client
        .get(NOMINATIM_URL)
        .query(&[
            ("format", "jsonv2".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("accept-language", "en".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let body: serde_json::Value = response.json().await?;
    body.get("display_name")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("reverse-geocode response has no display_name"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
