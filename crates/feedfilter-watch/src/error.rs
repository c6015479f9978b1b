//! Error types for the feed session.

use thiserror::Error;

/// Errors that can occur while processing feed events.
#[derive(Error, Debug)]
pub enum Error {
    /// Document or rule error from the filtering core.
    #[error(transparent)]
    Core(#[from] feedfilter_core::Error),

    /// The session is no longer receiving events.
    #[error("Feed session has stopped")]
    ChannelClosed,

    /// A render target could not be resolved.
    #[error("Render target '{0}' not found")]
    TargetNotFound(String),
}

/// Result type alias for feed session operations.
pub type Result<T> = std::result::Result<T, Error>;
