//! Session-side host interface: starting an AR session and subscribing to
//! its notification streams.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::types::{SelectEvent, SessionOptions, SessionState};

/// Opaque handle to a running AR session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionHandle(pub Arc<str>);

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host capability for the AR session lifecycle.
///
/// Session-state and select notifications are delivered over unbounded
/// channels; the host never blocks on a slow subscriber. Each subscription
/// replaces any previous one for the same session (single-callback
/// registration).
#[async_trait]
pub trait SessionHost: Send + Sync {
    /// Starts an AR session.
    ///
    /// # Errors
    ///
    /// [`Error::SessionInit`](crate::Error::SessionInit) when the device or a
    /// required feature is unsupported. This is unrecoverable for the run.
    async fn start_session(&self, options: SessionOptions) -> Result<SessionHandle>;

    /// Subscribes to session lifecycle notifications.
    fn subscribe_session_state(
        &self,
        session: &SessionHandle,
    ) -> mpsc::UnboundedReceiver<SessionState>;

    /// Subscribes to user select gestures.
    fn subscribe_select(&self, session: &SessionHandle) -> mpsc::UnboundedReceiver<SelectEvent>;

    /// Ends the session. Idempotent; ending an already-ended session is a no-op.
    async fn end_session(&self, session: &SessionHandle) -> Result<()>;
}
