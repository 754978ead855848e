//! placard: AR poster placement core.
//!
//! The viewer anchors a single flat poster onto a real-world surface: an AR
//! session is started against an abstract host, surfaces are hit-tested at a
//! fixed viewport sample point on each user select, and successful hits are
//! committed as the poster's placement.
//!
//! The crate owns the control flow only. Camera, lighting, materials, and
//! everything else a rendering engine does are behind the
//! [`placard_host`] traits.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use placard::{Viewer, ViewerOptions};
//! use placard_host::LogStatusSink;
//! use placard_host::sim::SimHost;
//!
//! #[tokio::main]
//! async fn main() -> placard::Result<()> {
//!     let host = Arc::new(SimHost::new());
//!     let viewer = Viewer::launch(
//!         host.clone(),
//!         Some(Arc::new(LogStatusSink)),
//!         ViewerOptions::default(),
//!     )
//!     .await?;
//!
//!     // ... host delivers session-state and select events ...
//!
//!     viewer.shutdown().await
//! }
//! ```

pub mod options;
pub mod placement;
pub mod poster;
pub mod session;
pub mod viewer;

pub use options::ViewerOptions;
pub use placement::{
    PlacementConfig, PlacementController, PlacementOutcome, PlacementPolicy, STATUS_NO_SURFACE,
    STATUS_PLACED,
};
pub use poster::{Poster, SharedPoster};
pub use session::{STATUS_ACTIVE, STATUS_ENDED, SessionStateMachine};
pub use viewer::Viewer;

// Re-export the host interface types callers need alongside the core.
pub use placard_host::{Error, Result};
