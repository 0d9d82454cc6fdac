//! crates/sp_io/src/lib.rs
//! Local-file I/O for the seat projection engine.
//!
//! - `loader`: scenario JSON → validated domain types.
//! - `canonical_json`: sorted-key compact bytes and atomic writes.
//! - `hasher`: SHA-256 digests and the `RES:` content id.
//!
//! No network I/O.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for sp_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Reading an input file failed.
    #[error("read error ({path}): {msg}")]
    Read { path: String, msg: String },

    /// Filesystem errors while writing (create_dir_all, rename, fsync, ...).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse or shape errors with a JSON Pointer to the offending node.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    #[error("hash error: {0}")]
    Hash(String),

    /// Input parsed fine but violates a domain rule.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column, not a pointer.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;

pub mod prelude {
    pub use crate::{IoError, IoResult};

    pub use crate::canonical_json::{to_canonical_json_bytes, write_canonical_file};
    pub use crate::hasher::{res_id_from_canonical, sha256_canonical, sha256_hex};
    pub use crate::loader::{load_scenario, parse_scenario, Scenario, ScenarioSource};
}
