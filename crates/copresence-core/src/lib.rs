//! Core types and pure computations for copresence.
//!
//! Holds the canonical event model, the error type shared by all crates,
//! the great-circle distance engine, timestamp utilities and the CLI
//! settings surface.

pub mod error;
pub mod geo;
pub mod models;
pub mod settings;
pub mod time_utils;
