//! Comparison engine for copresence.
//!
//! The matcher finds all cross-timeline proximity events for one pair of
//! sorted event sequences; the orchestrator fans the matcher out over every
//! unordered pair of timelines and reduces the results deterministically.

pub mod matcher;
pub mod orchestrator;
