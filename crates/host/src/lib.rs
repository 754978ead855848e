//! Placard host interface layer.
//!
//! The placement core never talks to a rendering engine or an XR runtime
//! directly; it consumes the capabilities defined here:
//!
//! - **Scene**: creating and mutating placeable objects ([`SceneHost`])
//! - **Session**: starting an AR session and subscribing to its lifecycle
//!   and select-gesture streams ([`SessionHost`])
//! - **Hit testing**: asynchronous surface queries ([`HitTester`])
//! - **Status**: fire-and-forget user-facing status text ([`StatusSink`])
//!
//! A real integration implements these against an actual AR host. The
//! [`sim::SimHost`] implements them against scripted in-memory state so the
//! placement flow can be rehearsed headlessly.

pub mod error;
pub mod hit;
pub mod scene;
pub mod session;
pub mod sim;
pub mod status;
pub mod types;

pub use error::{Error, Result};
pub use hit::{HitOutcome, HitResult, HitTester};
pub use scene::{AnchorHandle, PlaceableHandle, SceneHost};
pub use session::{SessionHandle, SessionHost};
pub use status::{LogStatusSink, StatusSink};
pub use types::{
    PosterSize, Quat, SamplePoint, SelectEvent, SessionOptions, SessionState, Transform, Vec3,
};

/// Everything the placement core needs from one host, as a single object.
pub trait ArHost: SceneHost + SessionHost + HitTester {}

impl<T: SceneHost + SessionHost + HitTester> ArHost for T {}
