use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by copresence.
///
/// The first four variants are per-file: they are reported and the run
/// continues with the remaining inputs. `Config` is fatal before any
/// processing starts.
#[derive(Error, Debug)]
pub enum CopresenceError {
    /// A timeline file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A timeline file is not valid JSON.
    #[error("Could not decode JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document is valid JSON but no format adapter recognises its shape.
    #[error("No known timeline schema matches {0}")]
    UnrecognizedSchema(PathBuf),

    /// The date filter (or the document itself) left no usable events.
    #[error("No valid events found in {0} for the specified year range")]
    EmptyScope(PathBuf),

    /// A threshold or year argument is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the copresence crates.
pub type Result<T> = std::result::Result<T, CopresenceError>;
