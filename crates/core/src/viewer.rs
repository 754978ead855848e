//! The orchestrating viewer: wires host subscriptions to the state machine
//! and placement controller.

use std::sync::Arc;

use tokio::task::JoinHandle;

use placard_host::{
    ArHost, Error, HitTester, Result, SceneHost, SessionHandle, SessionHost, SessionState,
    StatusSink,
};

use crate::options::ViewerOptions;
use crate::placement::PlacementController;
use crate::poster::{Poster, SharedPoster};
use crate::session::{STATUS_ACTIVE, SessionStateMachine};

/// One AR poster placement run.
///
/// `launch` creates the poster placeable (disabled), starts the AR session,
/// and spawns two event loops: session-state notifications feed the
/// [`SessionStateMachine`]; each select gesture spawns its own placement
/// task so hit tests may overlap in flight. Dropping the viewer aborts the
/// loops.
pub struct Viewer {
    poster: SharedPoster,
    machine: Arc<SessionStateMachine>,
    controller: Arc<PlacementController>,
    session_host: Arc<dyn SessionHost>,
    session: SessionHandle,
    tasks: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewer").finish_non_exhaustive()
    }
}

impl Viewer {
    /// Launches the viewer against a host.
    ///
    /// # Errors
    ///
    /// [`Error::SessionInit`] when the host cannot start an AR session. The
    /// failure is reported through the status sink with retry guidance
    /// before the error is returned; the caller is expected to surface it
    /// without crashing.
    pub async fn launch<H>(
        host: Arc<H>,
        status: Option<Arc<dyn StatusSink>>,
        options: ViewerOptions,
    ) -> Result<Self>
    where
        H: ArHost + 'static,
    {
        let scene: Arc<dyn SceneHost> = host.clone();
        let hits: Arc<dyn HitTester> = host.clone();
        let session_host: Arc<dyn SessionHost> = host.clone();

        tracing::debug!(image = %options.image_source, "creating poster placeable");
        let handle = scene.create_placeable(&options.image_source, options.size)?;
        let poster = Poster::new(options.image_source, options.size, handle).shared();

        let machine = Arc::new(SessionStateMachine::new(
            scene.clone(),
            poster.clone(),
            status.clone(),
        ));
        let controller = Arc::new(PlacementController::new(
            scene,
            hits,
            poster.clone(),
            status.clone(),
            options.placement,
        ));

        if let Some(sink) = &status {
            sink.report_status(STATUS_ACTIVE);
        }

        let session = match session_host.start_session(options.session).await {
            Ok(session) => session,
            Err(err) => {
                match &err {
                    Error::SessionInit(message) => machine.fail_start(message)?,
                    other => machine.fail_start(&other.to_string())?,
                }
                return Err(err);
            }
        };
        tracing::debug!(%session, "AR session started");

        let mut state_rx = session_host.subscribe_session_state(&session);
        let mut select_rx = session_host.subscribe_select(&session);

        let mut tasks = Vec::new();

        let state_machine = machine.clone();
        tasks.push(tokio::spawn(async move {
            while let Some(state) = state_rx.recv().await {
                if let Err(err) = state_machine.on_session_state(state) {
                    tracing::error!(error = %err, "session state handling failed");
                }
            }
            tracing::debug!("session-state stream closed");
        }));

        let select_controller = controller.clone();
        tasks.push(tokio::spawn(async move {
            while select_rx.recv().await.is_some() {
                let controller = select_controller.clone();
                tokio::spawn(async move {
                    match controller.on_select().await {
                        Ok(outcome) => tracing::trace!(?outcome, "select handled"),
                        Err(err) => tracing::warn!(error = %err, "placement failed"),
                    }
                });
            }
            tracing::debug!("select stream closed");
        }));

        Ok(Self {
            poster,
            machine,
            controller,
            session_host,
            session,
            tasks,
        })
    }

    /// Current session state.
    pub fn session_state(&self) -> SessionState {
        self.machine.state()
    }

    /// Snapshot of the poster entity.
    pub fn poster(&self) -> Poster {
        self.poster.lock().clone()
    }

    /// Handle of the running session.
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Number of placements committed so far.
    pub fn commit_count(&self) -> u64 {
        self.controller.commit_count()
    }

    /// Ends the session and stops the event loops.
    pub async fn shutdown(self) -> Result<()> {
        self.session_host.end_session(&self.session).await?;
        // Drive the transition directly as well; the state loop may already
        // be aborted by the time the host's notification would arrive.
        self.machine.on_session_state(SessionState::Ended)?;
        for task in &self.tasks {
            task.abort();
        }
        Ok(())
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
