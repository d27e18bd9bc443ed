//! Comparison orchestrator.
//!
//! Enumerates every unordered pair of loaded timelines exactly once, runs
//! the matcher per pair, and folds the per-pair results into a
//! [`GlobalResult`]. Pairs are mutually independent, so the matcher calls
//! run on the rayon pool; results are collected back into enumeration order
//! before reduction, which keeps the closest-match tie-break (first pair in
//! input-file order) deterministic regardless of completion order.

use copresence_core::models::{GlobalClosest, GlobalResult, PairResult, Thresholds, Timeline};
use rayon::prelude::*;
use tracing::debug;

use crate::matcher;

/// Compare every unordered pair of timelines.
///
/// Fewer than two timelines is not an error: the result is simply empty.
pub fn compare_all(timelines: &[Timeline], thresholds: &Thresholds) -> GlobalResult {
    if timelines.len() < 2 {
        return GlobalResult::empty();
    }

    let mut pair_indices: Vec<(usize, usize)> = Vec::new();
    for a in 0..timelines.len() {
        for b in (a + 1)..timelines.len() {
            pair_indices.push((a, b));
        }
    }

    // rayon's collect preserves input order, so `pairs` comes back in
    // enumeration order even though the matcher calls run concurrently.
    let pairs: Vec<PairResult> = pair_indices
        .par_iter()
        .map(|&(a, b)| {
            let left = &timelines[a];
            let right = &timelines[b];
            let found = matcher::find_matches(&left.events, &right.events, thresholds);
            debug!(
                "{} vs {}: {} matches",
                left.label,
                right.label,
                found.matches.len()
            );
            PairResult {
                left_label: left.label.clone(),
                right_label: right.label.clone(),
                match_count: found.matches.len(),
                closest: found.closest,
            }
        })
        .collect();

    let total_matches = pairs.iter().map(|p| p.match_count).sum();

    // Ordered fold with strict < so the first pair wins distance ties.
    let mut closest: Option<GlobalClosest> = None;
    for (pair_index, pair) in pairs.iter().enumerate() {
        if let Some(matched) = pair.closest {
            let better = closest
                .as_ref()
                .map_or(true, |c| matched.distance_meters < c.matched.distance_meters);
            if better {
                closest = Some(GlobalClosest {
                    pair_index,
                    matched,
                });
            }
        }
    }

    GlobalResult {
        pairs,
        total_matches,
        closest,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
