//! AR session lifecycle state machine.

use std::sync::Arc;

use parking_lot::Mutex;
use placard_host::{Result, SceneHost, SessionState, StatusSink};

use crate::poster::SharedPoster;

/// Status text shown while a session is active and the poster awaits a tap.
pub const STATUS_ACTIVE: &str = "Point your camera at a wall and tap to place the poster";
/// Status text shown once the session has ended.
pub const STATUS_ENDED: &str = "AR session ended";

/// Tracks the `Inactive -> Active -> Ended` lifecycle and drives the single
/// side effect of poster enablement.
///
/// Notifications are handled synchronously and briefly: a property mutation
/// on the externally-owned poster plus a status report. Redelivered states
/// are no-ops and `Ended` is terminal; a new session requires a fresh
/// machine.
pub struct SessionStateMachine {
    scene: Arc<dyn SceneHost>,
    poster: SharedPoster,
    status: Option<Arc<dyn StatusSink>>,
    state: Mutex<SessionState>,
}

impl SessionStateMachine {
    pub fn new(
        scene: Arc<dyn SceneHost>,
        poster: SharedPoster,
        status: Option<Arc<dyn StatusSink>>,
    ) -> Self {
        Self {
            scene,
            poster,
            status,
            state: Mutex::new(SessionState::Inactive),
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Handles a session-state notification from the host.
    pub fn on_session_state(&self, next: SessionState) -> Result<()> {
        let mut state = self.state.lock();
        if *state == next {
            tracing::trace!(?next, "session state redelivered, no-op");
            return Ok(());
        }
        match (*state, next) {
            (_, SessionState::Inactive) => {
                tracing::trace!("inactive notification ignored");
                Ok(())
            }
            (SessionState::Ended, _) => {
                tracing::warn!(?next, "notification after session end ignored");
                Ok(())
            }
            (_, SessionState::Active) => {
                *state = SessionState::Active;
                drop(state);
                tracing::debug!("session active");
                self.set_poster_enabled(true)?;
                self.report(STATUS_ACTIVE);
                Ok(())
            }
            (_, SessionState::Ended) => {
                *state = SessionState::Ended;
                drop(state);
                tracing::debug!("session ended");
                self.set_poster_enabled(false)?;
                self.report(STATUS_ENDED);
                Ok(())
            }
        }
    }

    /// Records a session start failure: the machine never reaches `Active`
    /// and goes straight to `Ended`, reporting the error with retry guidance.
    pub fn fail_start(&self, message: &str) -> Result<()> {
        {
            let mut state = self.state.lock();
            if *state == SessionState::Ended {
                return Ok(());
            }
            *state = SessionState::Ended;
        }
        tracing::debug!(message, "session start failed");
        self.set_poster_enabled(false)?;
        self.report(&format!(
            "AR session failed to start: {message}. Reload to try again."
        ));
        Ok(())
    }

    fn set_poster_enabled(&self, enabled: bool) -> Result<()> {
        let mut poster = self.poster.lock();
        if poster.enabled == enabled {
            return Ok(());
        }
        self.scene.set_enabled(poster.handle(), enabled)?;
        poster.enabled = enabled;
        Ok(())
    }

    fn report(&self, message: &str) {
        if let Some(sink) = &self.status {
            sink.report_status(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::Poster;
    use placard_host::sim::SimHost;
    use placard_host::{PosterSize, SessionState};

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<String>>);

    impl StatusSink for RecordingSink {
        fn report_status(&self, message: &str) {
            self.0.lock().push(message.to_string());
        }
    }

    fn machine_with_host() -> (Arc<SimHost>, Arc<RecordingSink>, SessionStateMachine) {
        let host = Arc::new(SimHost::new());
        let sink = Arc::new(RecordingSink::default());
        let handle = host
            .create_placeable("img/img.png", PosterSize::default())
            .unwrap();
        let poster = Poster::new("img/img.png".into(), PosterSize::default(), handle).shared();
        let machine = SessionStateMachine::new(
            host.clone(),
            poster,
            Some(sink.clone() as Arc<dyn StatusSink>),
        );
        (host, sink, machine)
    }

    #[test]
    fn active_enables_the_poster() {
        let (_host, sink, machine) = machine_with_host();

        machine.on_session_state(SessionState::Active).unwrap();

        assert_eq!(machine.state(), SessionState::Active);
        assert!(machine.poster.lock().enabled());
        assert!(sink.0.lock().iter().any(|m| m.contains("tap")));
    }

    #[test]
    fn ended_disables_the_poster() {
        let (_host, _sink, machine) = machine_with_host();

        machine.on_session_state(SessionState::Active).unwrap();
        machine.on_session_state(SessionState::Ended).unwrap();

        assert_eq!(machine.state(), SessionState::Ended);
        assert!(!machine.poster.lock().enabled());
    }

    #[test]
    fn redelivery_is_a_no_op() {
        let (host, _sink, machine) = machine_with_host();

        machine.on_session_state(SessionState::Active).unwrap();
        let calls_before = host.calls().len();
        machine.on_session_state(SessionState::Active).unwrap();

        assert_eq!(host.calls().len(), calls_before);
    }

    #[test]
    fn inactive_notification_is_ignored() {
        let (_host, _sink, machine) = machine_with_host();

        machine.on_session_state(SessionState::Inactive).unwrap();
        assert_eq!(machine.state(), SessionState::Inactive);

        machine.on_session_state(SessionState::Active).unwrap();
        machine.on_session_state(SessionState::Inactive).unwrap();
        assert_eq!(machine.state(), SessionState::Active);
        assert!(machine.poster.lock().enabled());
    }

    #[test]
    fn ended_is_terminal() {
        let (_host, _sink, machine) = machine_with_host();

        machine.on_session_state(SessionState::Ended).unwrap();
        machine.on_session_state(SessionState::Active).unwrap();

        assert_eq!(machine.state(), SessionState::Ended);
        assert!(!machine.poster.lock().enabled());
    }

    #[test]
    fn fail_start_reports_the_error_and_ends() {
        let (_host, sink, machine) = machine_with_host();

        machine.fail_start("no AR support").unwrap();

        assert_eq!(machine.state(), SessionState::Ended);
        assert!(!machine.poster.lock().enabled());
        let messages = sink.0.lock();
        assert!(messages.iter().any(|m| m.contains("no AR support")));
        assert!(messages.iter().any(|m| m.contains("Reload")));
    }

    #[test]
    fn enabled_tracks_most_recent_state_across_sequences() {
        // For all delivered sequences, enabled == (latest state is Active).
        let sequences: &[&[SessionState]] = &[
            &[SessionState::Active],
            &[SessionState::Active, SessionState::Active],
            &[SessionState::Active, SessionState::Ended],
            &[SessionState::Ended],
            &[SessionState::Inactive, SessionState::Active],
            &[
                SessionState::Active,
                SessionState::Inactive,
                SessionState::Ended,
            ],
        ];

        for seq in sequences {
            let (_host, _sink, machine) = machine_with_host();
            let mut latest = SessionState::Inactive;
            for &s in *seq {
                machine.on_session_state(s).unwrap();
                // Inactive redeliveries and post-Ended states do not count.
                if latest != SessionState::Ended && s != SessionState::Inactive {
                    latest = s;
                }
            }
            assert_eq!(
                machine.poster.lock().enabled(),
                latest == SessionState::Active,
                "sequence {seq:?}"
            );
        }
    }
}
