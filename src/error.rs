//! Error type shared by the provider layer, the harness and the binaries.

use std::io;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a benchmark run.
///
/// None of these are recovered locally: the harness propagates the first one
/// it sees and the binaries exit with it.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown or unsupported curve identifier.
    #[error("invalid curve: {0}")]
    InvalidCurve(String),

    /// Malformed or impossible `order:modulus` group size.
    #[error("invalid group size: {0}")]
    InvalidGroup(String),

    /// Message does not fit the group's plaintext space.
    #[error("message of {len} bytes does not fit the plaintext space ({capacity} bytes)")]
    Encoding { len: usize, capacity: usize },

    /// Any other failure surfaced by the cryptographic backend.
    #[error("provider failure: {0}")]
    Provider(String),

    /// Aggregation over a sample set with no samples.
    #[error("cannot aggregate an empty sample set")]
    EmptySampleSet,

    /// The process CPU clock could not be read.
    #[error("reading process CPU time failed: {0}")]
    Clock(#[source] io::Error),

    /// Writing the statistics data file failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn provider(msg: impl Into<String>) -> Self {
        Error::Provider(msg.into())
    }
}
