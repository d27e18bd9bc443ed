//! Data ingestion layer for copresence.
//!
//! Responsible for recognising the known location-history export schemas,
//! extracting canonical events from them, and loading whole timeline files
//! with per-file error isolation.

pub mod adapters;
pub mod loader;

pub use copresence_core as core;
