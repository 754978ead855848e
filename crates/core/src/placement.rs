//! Placement controller: turns select gestures into poster placements.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use placard_host::{
    HitOutcome, HitResult, HitTester, Result, SamplePoint, SceneHost, StatusSink,
};

use crate::poster::SharedPoster;

/// Status text reported after a successful placement.
pub const STATUS_PLACED: &str = "Poster placed";
/// Status text reported when no surface was found at the sample point.
pub const STATUS_NO_SURFACE: &str = "No surface found, try again";

/// How a successful hit is committed to the poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Reparent the poster to the detected surface anchor. Subsequent anchor
    /// re-estimates by the host keep moving the poster.
    #[default]
    Parent,
    /// Set the poster's world transform once; no ongoing anchor relationship.
    Snapshot,
}

/// Placement configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Viewport point sampled on every select. Fixed by configuration, not
    /// taken from the gesture location; defaults to center of view.
    #[serde(default)]
    pub sample_point: SamplePoint,
    #[serde(default)]
    pub policy: PlacementPolicy,
}

/// Result of handling one select gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// A placement was committed.
    Placed,
    /// The hit test found no surface; the prior placement is untouched.
    NoSurface,
    /// The select was ignored (poster disabled, or session ended while the
    /// hit test was in flight).
    Ignored,
}

/// Converts user select gestures into poster placements.
///
/// Selects may overlap: each gesture issues its own hit test and commits at
/// resolution time under the poster lock, so a later-completing hit always
/// overwrites an earlier one (last-commit-wins by completion order).
pub struct PlacementController {
    scene: Arc<dyn SceneHost>,
    hits: Arc<dyn HitTester>,
    poster: SharedPoster,
    status: Option<Arc<dyn StatusSink>>,
    config: PlacementConfig,
    commits: AtomicU64,
}

impl PlacementController {
    pub fn new(
        scene: Arc<dyn SceneHost>,
        hits: Arc<dyn HitTester>,
        poster: SharedPoster,
        status: Option<Arc<dyn StatusSink>>,
        config: PlacementConfig,
    ) -> Self {
        Self {
            scene,
            hits,
            poster,
            status,
            config,
            commits: AtomicU64::new(0),
        }
    }

    /// Handles one select gesture.
    ///
    /// A gesture delivered while the poster is disabled is silently ignored,
    /// without issuing a hit-test request. Hit-test failures to find a
    /// surface are never fatal; the user retries by tapping again.
    pub async fn on_select(&self) -> Result<PlacementOutcome> {
        {
            let poster = self.poster.lock();
            if !poster.enabled {
                tracing::trace!("select ignored, poster disabled");
                return Ok(PlacementOutcome::Ignored);
            }
        }

        let outcome = self.hits.hit_test(self.config.sample_point).await?;
        match outcome {
            HitOutcome::NotFound => {
                tracing::debug!("no surface at sample point");
                self.report(STATUS_NO_SURFACE);
                Ok(PlacementOutcome::NoSurface)
            }
            HitOutcome::Surface(hit) => self.commit(hit),
        }
    }

    /// Number of placements committed so far.
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    fn commit(&self, hit: HitResult) -> Result<PlacementOutcome> {
        let mut poster = self.poster.lock();
        if !poster.enabled {
            tracing::warn!("hit test resolved after session end, commit dropped");
            return Ok(PlacementOutcome::Ignored);
        }
        let handle = poster.handle().clone();

        match (self.config.policy, &hit.anchor) {
            (PlacementPolicy::Parent, Some(anchor)) => {
                self.scene.set_parent(&handle, Some(anchor))?;
                poster.anchor = Some(anchor.clone());
            }
            // Anchorless hits fall back to a snapshot commit.
            (PlacementPolicy::Parent, None) | (PlacementPolicy::Snapshot, _) => {
                if poster.anchor.is_some() {
                    self.scene.set_parent(&handle, None)?;
                    poster.anchor = None;
                }
                self.scene.set_transform(&handle, hit.transform)?;
            }
        }
        poster.transform = Some(hit.transform);
        drop(poster);

        let commit = self.commits.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(commit, "poster placement committed");
        self.report(STATUS_PLACED);
        Ok(PlacementOutcome::Placed)
    }

    fn report(&self, message: &str) {
        if let Some(sink) = &self.status {
            sink.report_status(message);
        }
    }
}
