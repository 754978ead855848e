//! The poster entity: the sole placeable object the core manages.

use std::sync::Arc;

use parking_lot::Mutex;
use placard_host::{AnchorHandle, PlaceableHandle, PosterSize, Transform};

/// Shared ownership of the single poster.
///
/// This mutex is the single-owner lock serializing enablement and placement
/// mutation; it is never held across an await.
pub type SharedPoster = Arc<Mutex<Poster>>;

/// The flat, textured placeable entity.
///
/// Created once at startup, disabled and without a transform. The session
/// state machine flips `enabled`; the placement controller commits
/// `transform` (and `anchor`, under the parenting policy). The transform
/// survives session end untouched.
#[derive(Debug, Clone)]
pub struct Poster {
    image_source: String,
    size: PosterSize,
    handle: PlaceableHandle,
    pub(crate) enabled: bool,
    pub(crate) transform: Option<Transform>,
    pub(crate) anchor: Option<AnchorHandle>,
}

impl Poster {
    pub fn new(image_source: String, size: PosterSize, handle: PlaceableHandle) -> Self {
        Self {
            image_source,
            size,
            handle,
            enabled: false,
            transform: None,
            anchor: None,
        }
    }

    pub fn shared(self) -> SharedPoster {
        Arc::new(Mutex::new(self))
    }

    /// Identifier of the texture this poster displays. Opaque to the core.
    pub fn image_source(&self) -> &str {
        &self.image_source
    }

    /// Fixed physical dimensions, immutable after creation.
    pub fn size(&self) -> PosterSize {
        self.size
    }

    /// Host handle of the underlying placeable.
    pub fn handle(&self) -> &PlaceableHandle {
        &self.handle
    }

    /// True only while a session is active.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// World-space placement, absent until the first successful commit.
    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }

    /// Surface anchor the poster is parented to, if any.
    pub fn anchor(&self) -> Option<&AnchorHandle> {
        self.anchor.as_ref()
    }

    /// True once a placement has been committed.
    pub fn is_placed(&self) -> bool {
        self.transform.is_some()
    }
}
