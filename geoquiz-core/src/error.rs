//! Error types for the quiz engine.
//!
//! Table integrity faults (`CatalogError`) are fatal configuration errors
//! raised once at load time. Gameplay faults (`GameError`) reject a single
//! request and leave the session untouched.

use std::path::PathBuf;

/// Data-integrity fault in an externally supplied entity table.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{collection}: code `{code}` must be exactly 2 ASCII letters")]
    InvalidCode {
        collection: &'static str,
        code: String,
    },

    #[error("{collection}: duplicate code `{code}`")]
    DuplicateCode {
        collection: &'static str,
        code: String,
    },

    #[error("{collection}: entity `{code}` belongs to unknown group `{group}`")]
    UnknownGroup {
        collection: &'static str,
        code: String,
        group: String,
    },

    #[error("dependency `{code}` points to unknown parent `{parent_code}`")]
    UnknownParent { code: String, parent_code: String },

    #[error("{language} translation given for unknown code `{code}`")]
    UnknownTranslation { language: String, code: String },

    #[error("hints given for unknown state `{code}`")]
    UnknownHintState { code: String },

    #[error("state `{code}` lists unknown neighbor `{neighbor}`")]
    UnknownNeighbor { code: String, neighbor: String },
}

/// A rejected gameplay request. No state transition happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("unknown game mode `{0}`")]
    UnknownMode(String),

    #[error("unknown group `{0}`")]
    UnknownGroup(String),

    #[error("unsupported language `{0}`")]
    UnknownLanguage(String),

    #[error("the game has ended, restart to keep playing")]
    SessionEnded,

    #[error("no {collection} with code `{code}`")]
    UnknownCode {
        collection: &'static str,
        code: String,
    },

    #[error("hint level {level} is out of range 1..={max}")]
    HintLevel { level: u8, max: u8 },

    #[error("no hints recorded for `{0}`")]
    NoHints(String),
}

/// Failure of the snapshot storage medium.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("snapshot storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Invalid or unreadable configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
