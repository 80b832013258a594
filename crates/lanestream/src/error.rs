//! Error types.

use std::io;

use thiserror::Error;

/// Failure of an [`EntropySource`](crate::EntropySource) to supply bytes.
#[derive(Debug, Error)]
pub enum EntropyError {
    /// The operating system entropy pool failed.
    #[error("OS entropy unavailable: {0}")]
    Os(#[source] getrandom::Error),

    /// A `rand` generator reported an error.
    #[error("generator failed: {0}")]
    Rng(#[source] rand::Error),

    /// A reader-backed source failed or ran dry.
    #[error("seed reader failed: {0}")]
    Io(#[from] io::Error),
}

/// Errors building or resetting a stream.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The seed source could not supply the template or subkey bytes.
    #[error("seed source could not supply {needed} bytes")]
    SeedUnavailable {
        /// Bytes requested from the source.
        needed: usize,
        /// Underlying source failure.
        source: EntropyError,
    },
}

/// Rejected seek.
///
/// The cursor is left untouched whenever a seek fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeekError {
    /// The resolved offset is below zero.
    #[error("seek to negative offset {target}")]
    Negative {
        /// The resolved offset.
        target: i128,
    },

    /// Seek relative to the end of a stream that has no end.
    #[error("cannot seek relative to the end of an unbounded stream")]
    Unbounded,

    /// The resolved offset lies beyond the end of a bounded stream.
    #[error("seek to {target} past end of stream ({size} bytes)")]
    PastEnd {
        /// The resolved offset.
        target: u64,
        /// Stream size.
        size: u64,
    },

    /// The resolved offset does not fit in a `u64`.
    #[error("seek offset overflows")]
    Overflow,
}

impl From<SeekError> for io::Error {
    fn from(err: SeekError) -> Self {
        Self::new(io::ErrorKind::InvalidInput, err)
    }
}
