//! Value types exchanged with the AR host.
//!
//! These are plain data carriers, serde-derived so drivers can read them from
//! scenario files and print them in result summaries.

use serde::{Deserialize, Serialize};

/// World-space position in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Unit quaternion orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// World-space pose: position plus orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    #[serde(default)]
    pub orientation: Quat,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// A transform at `position` with identity orientation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }
}

/// Fixed physical dimensions of a placeable, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PosterSize {
    pub width: f32,
    pub height: f32,
}

impl Default for PosterSize {
    /// The original poster: one meter wide, one and a half tall.
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.5,
        }
    }
}

/// Viewport sample point for hit tests, in normalized screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f32,
    pub y: f32,
}

impl SamplePoint {
    /// Center of the viewport, the default sample location.
    pub const CENTER: SamplePoint = SamplePoint { x: 0.5, y: 0.5 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for SamplePoint {
    fn default() -> Self {
        Self::CENTER
    }
}

/// AR session lifecycle state.
///
/// Transitions are one-way: `Inactive` to `Active` on a successful start,
/// `Active` (or `Inactive`, on an init failure) to `Ended`. There is no
/// transition out of `Ended`; a new session needs a fresh state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Inactive,
    Active,
    Ended,
}

/// Options for starting an AR session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    #[serde(default = "default_session_mode")]
    pub session_mode: String,
    #[serde(default = "default_reference_space")]
    pub reference_space: String,
    #[serde(default = "default_optional_features")]
    pub optional_features: Vec<String>,
}

fn default_session_mode() -> String {
    "immersive-ar".to_string()
}

fn default_reference_space() -> String {
    "local-floor".to_string()
}

fn default_optional_features() -> Vec<String> {
    vec!["plane-detection".to_string(), "hit-test".to_string()]
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            session_mode: default_session_mode(),
            reference_space: default_reference_space(),
            optional_features: default_optional_features(),
        }
    }
}

/// A user select gesture (tap or controller trigger).
///
/// Carries no payload today; the hit-test sample point is fixed by
/// configuration rather than taken from the gesture location.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectEvent;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_point_defaults_to_center() {
        assert_eq!(SamplePoint::default(), SamplePoint::CENTER);
        assert_eq!(SamplePoint::CENTER.x, 0.5);
        assert_eq!(SamplePoint::CENTER.y, 0.5);
    }

    #[test]
    fn session_options_default_to_immersive_ar() {
        let opts = SessionOptions::default();
        assert_eq!(opts.session_mode, "immersive-ar");
        assert_eq!(opts.reference_space, "local-floor");
        assert!(opts.optional_features.iter().any(|f| f == "hit-test"));
    }

    #[test]
    fn transform_deserializes_without_orientation() {
        let t: Transform =
            serde_json::from_str(r#"{"position":{"x":1.0,"y":2.0,"z":3.0}}"#).unwrap();
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.orientation, Quat::IDENTITY);
    }
}
