//! Console report formatting.
//!
//! Pure string builders with thin printing wrappers; the builders are what
//! the tests cover.

use std::time::Duration;

use copresence_core::error::CopresenceError;
use copresence_core::models::{GlobalResult, Match, PairResult, Timeline};

use crate::enrich::Enrichment;

// ── Per-file lines ─────────────────────────────────────────────────────────────

pub fn file_loaded(timeline: &Timeline) {
    println!(
        "Successfully processed {}, found {} events.",
        timeline.label,
        timeline.events.len()
    );
}

pub fn file_failed(err: &CopresenceError) {
    // Per-file error variants already carry the offending path.
    eprintln!("Error: {err}. Skipping.");
}

pub fn not_enough_timelines() {
    println!("Need at least two valid timeline files to compare. Exiting.");
}

// ── Per-pair and summary blocks ────────────────────────────────────────────────

pub fn pair_results(result: &GlobalResult) {
    for pair in &result.pairs {
        println!("{}", pair_block(pair));
    }
}

fn pair_block(pair: &PairResult) -> String {
    let mut block = format!(
        "\n--- Comparing {} and {} ---\n",
        pair.left_label, pair.right_label
    );
    match pair.closest {
        Some(closest) => block.push_str(&format!(
            "Found {} matches. Closest match in this pair: {:.2} meters.",
            pair.match_count, closest.distance_meters
        )),
        None => block.push_str("No matches found."),
    }
    block
}

pub fn summary(result: &GlobalResult) {
    println!("\n--- Overall Results ---");
    println!(
        "Total matches found across all files: {}",
        result.total_matches
    );
}

// ── Closest match detail ───────────────────────────────────────────────────────

pub fn closest_match(pair: &PairResult, matched: &Match, enrichment: &Enrichment) {
    println!("{}", closest_block(pair, matched, enrichment));
}

fn closest_block(pair: &PairResult, matched: &Match, enrichment: &Enrichment) -> String {
    let mut block = format!(
        "\nThe absolute closest match was between '{}' and '{}':\n",
        pair.left_label, pair.right_label
    );
    if let Some(place) = &enrichment.place_name {
        block.push_str(&format!("  Location Name: {place}\n"));
    }
    block.push_str(&format!(
        "  Distance: {:.2} meters\n",
        matched.distance_meters
    ));
    block.push_str(&format!(
        "  Time Difference: {:.2} seconds\n",
        matched.time_delta_seconds
    ));
    block.push_str(&format!(
        "  - {} Location: Lat {}, Lon {}\n    - Timestamp: {}\n",
        pair.left_label, matched.left.latitude, matched.left.longitude, enrichment.left_local
    ));
    block.push_str(&format!(
        "  - {} Location: Lat {}, Lon {}\n    - Timestamp: {}",
        pair.right_label, matched.right.latitude, matched.right.longitude, enrichment.right_local
    ));
    block
}

pub fn elapsed(duration: Duration) {
    println!("\nTotal execution time: {:.2} seconds", duration.as_secs_f64());
}

// ── Tests ─────────────────────────────────────────────────────────────────────
