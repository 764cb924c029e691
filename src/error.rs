//! Errors surfaced before a session starts.
//!
//! Nothing inside a tick can fail: gating outcomes (a refused jump) are
//! silent and degenerate geometry never collides. Everything here is a
//! configuration problem caught at load time.

use thiserror::Error;

/// Errors that can occur while building a level or loading configuration.
#[derive(Debug, Error)]
pub enum PlatformerError {
    /// A sprite sequence required by a reachable animation state is absent
    #[error("missing sprite sequence `{key}`")]
    MissingSequence {
        /// Sheet key, e.g. `double_jump_left`
        key: String,
    },

    /// A sprite sequence exists but has no frames
    #[error("sprite sequence `{key}` has no frames")]
    EmptySequence {
        /// Sheet key
        key: String,
    },

    /// Settings failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Reading or writing a settings/layout file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A settings/layout file is not valid JSON for its type
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlatformerError>;
