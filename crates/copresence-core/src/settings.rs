use chrono::TimeDelta;
use chrono_tz::Tz;
use clap::Parser;
use std::path::PathBuf;

use crate::error::{CopresenceError, Result};
use crate::models::{Thresholds, YearFilter};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Find proximity events across exported location-history timelines
#[derive(Parser, Debug, Clone)]
#[command(
    name = "copresence",
    about = "Find proximity events across exported location-history timelines",
    version
)]
pub struct Settings {
    /// Two or more timeline JSON files to compare
    #[arg(required = true, num_args = 2..)]
    pub files: Vec<PathBuf>,

    /// Time threshold in minutes
    #[arg(long, default_value_t = 2)]
    pub time: i64,

    /// Distance threshold in meters
    #[arg(long, default_value_t = 100.0)]
    pub distance: f64,

    /// Earliest year to include (inclusive)
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Latest year to include (inclusive)
    #[arg(long)]
    pub end_year: Option<i32>,

    /// Timezone for local-time display (auto = estimate from each coordinate)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Skip the reverse-geocode place lookup
    #[arg(long)]
    pub offline: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

// ── RunConfig ──────────────────────────────────────────────────────────────────

/// Validated configuration consumed by the loader, engine and report layers.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Matching thresholds (time window converted from minutes).
    pub thresholds: Thresholds,
    /// Inclusive year bounds for the loader.
    pub year_filter: YearFilter,
    /// Explicit display timezone, `None` when estimating from coordinates.
    pub display_tz: Option<Tz>,
    /// Skip network lookups in the report layer.
    pub offline: bool,
}

impl Settings {
    /// Validate the raw arguments into a [`RunConfig`].
    ///
    /// Any failure here is fatal before processing starts.
    pub fn validate(&self) -> Result<RunConfig> {
        if self.time <= 0 {
            return Err(CopresenceError::Config(format!(
                "--time must be a positive number of minutes, got {}",
                self.time
            )));
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(CopresenceError::Config(format!(
                "--distance must be a non-negative number of meters, got {}",
                self.distance
            )));
        }
        if let (Some(start), Some(end)) = (self.start_year, self.end_year) {
            if end < start {
                return Err(CopresenceError::Config(format!(
                    "--end-year {} is before --start-year {}",
                    end, start
                )));
            }
        }

        let time_window = TimeDelta::try_minutes(self.time).ok_or_else(|| {
            CopresenceError::Config(format!(
                "--time {} minutes is out of range",
                self.time
            ))
        })?;

        let display_tz = if self.timezone == "auto" {
            None
        } else {
            Some(self.timezone.parse::<Tz>().map_err(|_| {
                CopresenceError::Config(format!("unrecognised timezone \"{}\"", self.timezone))
            })?)
        };

        Ok(RunConfig {
            thresholds: Thresholds {
                time_window,
                distance_meters: self.distance,
            },
            year_filter: YearFilter {
                start: self.start_year,
                end: self.end_year,
            },
            display_tz,
            offline: self.offline,
        })
    }
}
