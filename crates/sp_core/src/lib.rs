//! sp_core: core types, parameter domains, and ordering helpers.
//!
//! This crate is **I/O-free**. It defines stable types used across the
//! engine (`sp_algo`, `sp_io`, `sp_pipeline`, `sp_cli`).
//!
//! - Registry tokens: `CommitteeId`, `DistrictNumber`
//! - Entities: `Committee`, `District`, `SupportVector`
//! - Parameters: `AllocationMethod`, `CoalitionRules`, `DistrictOverride`, `Params`
//! - Deterministic ordering helpers for float keys
//!
//! Committees are always addressed by their position in the canonical
//! committee list; every per-committee vector in the engine shares that index
//! space.
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Error set for core-domain construction and parsing.
    #[derive(Clone, Debug, PartialEq)]
    pub enum CoreError {
        InvalidToken(String),
        DomainOutOfRange(&'static str),
        ZeroSeats(u32),
        LengthMismatch { expected: usize, got: usize },
        DuplicateCommittee(String),
        UnknownCommittee(String),
        DuplicateDistrict(u32),
        MissingHistoricalSupport { district: u32, committee: String },
        UnknownMethod(String),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidToken(s) => write!(f, "invalid token: {s:?}"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
                CoreError::ZeroSeats(n) => write!(f, "district {n} must have at least one seat"),
                CoreError::LengthMismatch { expected, got } => {
                    write!(f, "length mismatch: expected {expected} entries, got {got}")
                }
                CoreError::DuplicateCommittee(id) => write!(f, "duplicate committee id: {id}"),
                CoreError::UnknownCommittee(id) => write!(f, "unknown committee id: {id}"),
                CoreError::DuplicateDistrict(n) => write!(f, "duplicate district number: {n}"),
                CoreError::MissingHistoricalSupport { district, committee } => write!(
                    f,
                    "district {district} has no historical support for committee {committee}"
                ),
                CoreError::UnknownMethod(s) => write!(f, "unknown allocation method: {s}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod determinism;
pub mod entities;
pub mod ids;
pub mod presets;
pub mod variables;

pub use errors::CoreError;
