//! Error types for the Portal3D engine
//!
//! This module defines the error types used throughout the engine,
//! including render target pooling, portal traversal and traveler
//! transitions.

use std::fmt;

/// Result type for Portal3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Portal3D engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (render target creation, draw submission, etc.)
    BackendError(String),

    /// The render target pool reached its allocation ceiling
    ///
    /// Recoverable: the visibility graph skips the node that asked for it.
    PoolExhausted {
        /// Configured ceiling at the time of the request
        max_allocations: usize,
    },

    /// A traveler transition call arrived out of order (end without begin)
    InvalidTransitionState(String),

    /// The viewport changed while pool targets were still in flight
    ///
    /// Resizes are deferred to the next frame begin.
    ResolutionChangeDuringRecursion {
        /// Number of targets still in use when the resize was requested
        in_use: usize,
    },

    /// Invalid resource (unknown portal key, missing destination, etc.)
    InvalidResource(String),

    /// Invalid configuration value
    InvalidConfiguration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::PoolExhausted { max_allocations } => {
                write!(f, "Render target pool exhausted ({} allocations)", max_allocations)
            }
            Error::InvalidTransitionState(msg) => write!(f, "Invalid transition state: {}", msg),
            Error::ResolutionChangeDuringRecursion { in_use } => write!(
                f,
                "Resolution change requested with {} render targets in use",
                in_use
            ),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
