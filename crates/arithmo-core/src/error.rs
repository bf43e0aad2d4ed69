//! Contract-violation error types.
//!
//! These cover programming errors at the library boundary (unknown tier
//! names, out-of-range measurements). Running out of sample data is not an
//! error anywhere in arithmo; the engine answers "maintain, zero confidence"
//! instead.

use thiserror::Error;

/// A malformed input that callers must not pass in.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidInput {
    /// A tier string outside {easy, medium, hard}.
    #[error("unknown difficulty tier: {0}")]
    UnknownTier(String),

    /// A response latency below zero seconds.
    #[error("negative latency: {0}s")]
    NegativeLatency(f64),
}
