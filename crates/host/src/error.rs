//! Error types shared across the placard crates.

use thiserror::Error;

/// Result type alias for host operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the AR host.
///
/// A hit test that finds no surface is not an error; it is the
/// [`HitOutcome::NotFound`](crate::hit::HitOutcome::NotFound) variant and expected
/// during normal use.
#[derive(Debug, Error)]
pub enum Error {
    /// The AR session could not be started on this device.
    ///
    /// Unrecoverable for the current run. The user is told to retry or
    /// reload; the process does not crash.
    #[error("AR session failed to start: {0}")]
    SessionInit(String),

    /// The host rejected a scene or session call.
    #[error("host error: {0}")]
    Host(String),

    /// A placeable handle the host no longer knows about.
    #[error("placeable not found: {0}")]
    PlaceableNotFound(String),

    /// A subscription or pending host query ended unexpectedly.
    #[error("channel closed unexpectedly")]
    ChannelClosed,
}

impl Error {
    /// Returns true if this is a session initialization failure.
    pub fn is_session_init(&self) -> bool {
        matches!(self, Error::SessionInit(_))
    }
}
