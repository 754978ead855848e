//! Scene-side host interface: creating and mutating placeable objects.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{PosterSize, Transform};

/// Opaque handle to a placeable scene object, in the host's `kind@n` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceableHandle(pub Arc<str>);

impl fmt::Display for PlaceableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a host-tracked surface anchor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorHandle(pub Arc<str>);

impl fmt::Display for AnchorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rendering/scene host the core drives placeable mutations through.
///
/// All methods are synchronous property mutations; the host applies them
/// immediately (or queues them internally) and never blocks the caller. This
/// keeps the calls safe from event-dispatch contexts that must stay brief.
pub trait SceneHost: Send + Sync {
    /// Creates a placeable for the given texture source and physical size.
    ///
    /// The placeable starts disabled and has no transform until the caller
    /// commits one.
    fn create_placeable(&self, image_source: &str, size: PosterSize) -> Result<PlaceableHandle>;

    /// Shows or hides a placeable.
    fn set_enabled(&self, handle: &PlaceableHandle, enabled: bool) -> Result<()>;

    /// Sets a placeable's world-space transform.
    fn set_transform(&self, handle: &PlaceableHandle, transform: Transform) -> Result<()>;

    /// Parents a placeable to a surface anchor, or detaches it with `None`.
    ///
    /// While parented, the host moves the placeable whenever it re-estimates
    /// the anchor's surface.
    fn set_parent(&self, handle: &PlaceableHandle, parent: Option<&AnchorHandle>) -> Result<()>;
}
