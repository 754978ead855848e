//! Scripted in-process AR host.
//!
//! [`SimHost`] implements every host capability against in-memory state so the
//! placement flow can be exercised without a device: tests and the scenario
//! driver script session events, select gestures, and hit-test outcomes, then
//! inspect the scene mutations the core performed.
//!
//! Hit tests pop a scripted queue in request order; each entry carries an
//! optional delay served with `tokio::time::sleep`, which makes overlapping
//! in-flight hit tests and completion-order scenarios reproducible.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::hit::{HitOutcome, HitResult, HitTester};
use crate::scene::{AnchorHandle, PlaceableHandle, SceneHost};
use crate::session::{SessionHandle, SessionHost};
use crate::types::{PosterSize, SamplePoint, SelectEvent, SessionOptions, SessionState, Transform};

/// A scene mutation recorded by [`SimHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    Create {
        handle: PlaceableHandle,
        image_source: String,
        size: PosterSize,
    },
    SetEnabled {
        handle: PlaceableHandle,
        enabled: bool,
    },
    SetTransform {
        handle: PlaceableHandle,
        transform: Transform,
    },
    SetParent {
        handle: PlaceableHandle,
        parent: Option<AnchorHandle>,
    },
}

/// Snapshot of a simulated placeable's scene state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceableState {
    pub image_source: String,
    pub size: PosterSize,
    pub enabled: bool,
    pub transform: Option<Transform>,
    pub parent: Option<AnchorHandle>,
}

struct ScriptedHit {
    outcome: HitOutcome,
    delay: Duration,
}

#[derive(Default)]
struct SimState {
    placeables: HashMap<PlaceableHandle, PlaceableState>,
    calls: Vec<SceneCall>,
    hits: VecDeque<ScriptedHit>,
    hit_requests: u32,
    fail_start: Option<String>,
    state_tx: Option<mpsc::UnboundedSender<SessionState>>,
    select_tx: Option<mpsc::UnboundedSender<SelectEvent>>,
}

/// Scripted AR host for tests and headless scenario replay.
#[derive(Default)]
pub struct SimHost {
    state: Mutex<SimState>,
    next_id: AtomicU32,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next `start_session` call to fail with `SessionInit`.
    pub fn fail_next_start(&self, message: impl Into<String>) {
        self.state.lock().fail_start = Some(message.into());
    }

    /// Queues a scripted outcome for the next unserved hit test.
    pub fn push_hit(&self, outcome: HitOutcome, delay: Duration) {
        self.state.lock().hits.push_back(ScriptedHit { outcome, delay });
    }

    /// Queues a successful surface hit at `transform`, optionally anchored.
    pub fn push_surface(&self, transform: Transform, anchor: Option<&str>, delay: Duration) {
        let anchor = anchor.map(|name| AnchorHandle(Arc::from(format!("anchor@{name}"))));
        self.push_hit(HitOutcome::Surface(HitResult { transform, anchor }), delay);
    }

    /// Queues a "no surface found" outcome.
    pub fn push_miss(&self, delay: Duration) {
        self.push_hit(HitOutcome::NotFound, delay);
    }

    /// Delivers a session-state notification to the subscriber, if any.
    pub fn emit_session_state(&self, state: SessionState) {
        let guard = self.state.lock();
        match &guard.state_tx {
            Some(tx) => {
                let _ = tx.send(state);
            }
            None => tracing::debug!(?state, "no session-state subscriber, notification dropped"),
        }
    }

    /// Delivers a select gesture to the subscriber, if any.
    pub fn emit_select(&self) {
        let guard = self.state.lock();
        match &guard.select_tx {
            Some(tx) => {
                let _ = tx.send(SelectEvent);
            }
            None => tracing::debug!("no select subscriber, gesture dropped"),
        }
    }

    /// Snapshot of a placeable's current scene state.
    pub fn placeable(&self, handle: &PlaceableHandle) -> Option<PlaceableState> {
        self.state.lock().placeables.get(handle).cloned()
    }

    /// All scene mutations performed so far, in call order.
    pub fn calls(&self) -> Vec<SceneCall> {
        self.state.lock().calls.clone()
    }

    /// Number of hit tests requested so far.
    pub fn hit_requests(&self) -> u32 {
        self.state.lock().hit_requests
    }

    /// Number of scripted hit outcomes not yet consumed.
    pub fn unserved_hits(&self) -> usize {
        self.state.lock().hits.len()
    }

    fn with_placeable<T>(
        &self,
        handle: &PlaceableHandle,
        f: impl FnOnce(&mut PlaceableState, &mut Vec<SceneCall>) -> T,
    ) -> Result<T> {
        let mut guard = self.state.lock();
        let SimState {
            placeables, calls, ..
        } = &mut *guard;
        let state = placeables
            .get_mut(handle)
            .ok_or_else(|| Error::PlaceableNotFound(handle.to_string()))?;
        Ok(f(state, calls))
    }
}

impl SceneHost for SimHost {
    fn create_placeable(&self, image_source: &str, size: PosterSize) -> Result<PlaceableHandle> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let handle = PlaceableHandle(Arc::from(format!("placeable@{id}")));
        let mut guard = self.state.lock();
        guard.placeables.insert(
            handle.clone(),
            PlaceableState {
                image_source: image_source.to_string(),
                size,
                enabled: false,
                transform: None,
                parent: None,
            },
        );
        guard.calls.push(SceneCall::Create {
            handle: handle.clone(),
            image_source: image_source.to_string(),
            size,
        });
        Ok(handle)
    }

    fn set_enabled(&self, handle: &PlaceableHandle, enabled: bool) -> Result<()> {
        self.with_placeable(handle, |state, calls| {
            state.enabled = enabled;
            calls.push(SceneCall::SetEnabled {
                handle: handle.clone(),
                enabled,
            });
        })
    }

    fn set_transform(&self, handle: &PlaceableHandle, transform: Transform) -> Result<()> {
        self.with_placeable(handle, |state, calls| {
            state.transform = Some(transform);
            calls.push(SceneCall::SetTransform {
                handle: handle.clone(),
                transform,
            });
        })
    }

    fn set_parent(&self, handle: &PlaceableHandle, parent: Option<&AnchorHandle>) -> Result<()> {
        self.with_placeable(handle, |state, calls| {
            state.parent = parent.cloned();
            calls.push(SceneCall::SetParent {
                handle: handle.clone(),
                parent: parent.cloned(),
            });
        })
    }
}

#[async_trait]
impl SessionHost for SimHost {
    async fn start_session(&self, options: SessionOptions) -> Result<SessionHandle> {
        let scripted_failure = self.state.lock().fail_start.take();
        if let Some(message) = scripted_failure {
            return Err(Error::SessionInit(message));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(mode = %options.session_mode, id, "simulated session started");
        Ok(SessionHandle(Arc::from(format!("session@{id}"))))
    }

    fn subscribe_session_state(
        &self,
        _session: &SessionHandle,
    ) -> mpsc::UnboundedReceiver<SessionState> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state.lock().state_tx = Some(tx);
        rx
    }

    fn subscribe_select(&self, _session: &SessionHandle) -> mpsc::UnboundedReceiver<SelectEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state.lock().select_tx = Some(tx);
        rx
    }

    async fn end_session(&self, _session: &SessionHandle) -> Result<()> {
        self.emit_session_state(SessionState::Ended);
        Ok(())
    }
}

#[async_trait]
impl HitTester for SimHost {
    async fn hit_test(&self, sample: SamplePoint) -> Result<HitOutcome> {
        // Pop synchronously so scripted outcomes are served in request order,
        // then serve the delay without holding the lock.
        let scripted = {
            let mut guard = self.state.lock();
            guard.hit_requests += 1;
            guard.hits.pop_front()
        };
        match scripted {
            Some(ScriptedHit { outcome, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                tracing::debug!(x = sample.x, y = sample.y, ?outcome, "hit test resolved");
                Ok(outcome)
            }
            None => {
                tracing::warn!(x = sample.x, y = sample.y, "hit test with no scripted outcome");
                Ok(HitOutcome::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec3;

    #[test]
    fn create_starts_disabled_without_transform() {
        let host = SimHost::new();
        let handle = host
            .create_placeable("img/img.png", PosterSize::default())
            .unwrap();

        let state = host.placeable(&handle).unwrap();
        assert!(!state.enabled);
        assert_eq!(state.transform, None);
        assert_eq!(state.parent, None);
        assert_eq!(state.image_source, "img/img.png");
    }

    #[test]
    fn mutations_are_recorded_in_order() {
        let host = SimHost::new();
        let handle = host
            .create_placeable("img/img.png", PosterSize::default())
            .unwrap();
        host.set_enabled(&handle, true).unwrap();
        host.set_transform(&handle, Transform::at(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();

        let calls = host.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[1], SceneCall::SetEnabled { enabled: true, .. }));
        assert!(matches!(calls[2], SceneCall::SetTransform { .. }));
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let host = SimHost::new();
        let bogus = PlaceableHandle(Arc::from("placeable@99"));
        let err = host.set_enabled(&bogus, true).unwrap_err();
        assert!(matches!(err, Error::PlaceableNotFound(_)));
    }

    #[tokio::test]
    async fn hit_tests_pop_the_script_in_request_order() {
        let host = SimHost::new();
        host.push_surface(Transform::at(Vec3::new(1.0, 0.0, 0.0)), None, Duration::ZERO);
        host.push_miss(Duration::ZERO);

        let first = host.hit_test(SamplePoint::CENTER).await.unwrap();
        let second = host.hit_test(SamplePoint::CENTER).await.unwrap();

        assert!(matches!(first, HitOutcome::Surface(_)));
        assert_eq!(second, HitOutcome::NotFound);
        assert_eq!(host.hit_requests(), 2);
    }

    #[tokio::test]
    async fn unscripted_hit_test_reports_no_surface() {
        let host = SimHost::new();
        let outcome = host.hit_test(SamplePoint::CENTER).await.unwrap();
        assert_eq!(outcome, HitOutcome::NotFound);
    }

    #[tokio::test]
    async fn scripted_start_failure_is_session_init() {
        let host = SimHost::new();
        host.fail_next_start("no AR support");

        let err = host
            .start_session(SessionOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_session_init());
        assert!(err.to_string().contains("no AR support"));

        // Only the next start is scripted to fail.
        assert!(host.start_session(SessionOptions::default()).await.is_ok());
    }

    #[tokio::test]
    async fn emitted_events_reach_the_subscriber() {
        let host = SimHost::new();
        let session = host.start_session(SessionOptions::default()).await.unwrap();
        let mut states = host.subscribe_session_state(&session);
        let mut selects = host.subscribe_select(&session);

        host.emit_session_state(SessionState::Active);
        host.emit_select();

        assert_eq!(states.recv().await, Some(SessionState::Active));
        assert!(selects.recv().await.is_some());
    }
}
