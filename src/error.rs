//! Error types for the compilation database filter

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which input file a [`FilterError::MissingInput`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The JSON list of excluded directory-name sequences
    ExclusionConfig,
    /// The `compile_commands.json` generated by the build system
    CompilationDatabase,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::ExclusionConfig => f.write_str("file to list excluded directories"),
            InputKind::CompilationDatabase => f.write_str("file to list compile commands"),
        }
    }
}

/// Errors raised while loading, filtering or writing a compilation database
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("** FATAL - {kind} is missing:\n{}", path.display())]
    MissingInput { kind: InputKind, path: PathBuf },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected JSON shape in {}: {reason}", path.display())]
    InvalidShape { path: PathBuf, reason: String },

    #[error("Compile entry #{index} has no string \"{key}\" key")]
    MissingKey { index: usize, key: &'static str },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot determine the directory of the running executable: {0}")]
    AnchorUnavailable(#[source] std::io::Error),
}

/// Result type for filter operations
pub type Result<T> = std::result::Result<T, FilterError>;
