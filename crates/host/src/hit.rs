//! Hit-test host capability.

use async_trait::async_trait;

use crate::error::Result;
use crate::scene::AnchorHandle;
use crate::types::{SamplePoint, Transform};

/// A successful hit against a detected real-world surface.
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    /// World-space pose of the hit point on the surface.
    pub transform: Transform,
    /// Anchor tracking the surface, when the host exposes one.
    pub anchor: Option<AnchorHandle>,
}

/// Outcome of a hit test. Finding no surface is expected, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum HitOutcome {
    Surface(HitResult),
    NotFound,
}

/// Host capability for querying detected surfaces.
///
/// Resolution is asynchronous relative to the caller; multiple hit tests may
/// be in flight at once and complete in any order.
#[async_trait]
pub trait HitTester: Send + Sync {
    /// Queries the host's surface understanding at a viewport sample point.
    async fn hit_test(&self, sample: SamplePoint) -> Result<HitOutcome>;
}
