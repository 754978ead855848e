//! Scenario file format: a scripted sequence of host events.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use placard::ViewerOptions;

/// A replayable placement scenario.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Viewer configuration; missing fields take their defaults.
    #[serde(default)]
    pub viewer: ViewerOptions,
    pub steps: Vec<Step>,
}

/// One scripted host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Make session start fail with the given message. Must be the first step.
    FailStart { message: String },
    /// Deliver an `Active` session-state notification.
    SessionActive,
    /// Deliver an `Ended` session-state notification.
    SessionEnded,
    /// A user tap. `hit` scripts the hit-test outcome (absent means no
    /// surface found); `delay_ms` delays its resolution.
    Select {
        #[serde(default)]
        hit: Option<HitSpec>,
        #[serde(default)]
        delay_ms: u64,
    },
    /// Idle for the given duration, letting in-flight hit tests resolve.
    Wait { ms: u64 },
}

/// A scripted surface hit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HitSpec {
    /// World-space hit position, `[x, y, z]` in meters.
    pub position: [f32; 3],
    /// Name of the surface anchor, when the host tracks one.
    #[serde(default)]
    pub anchor: Option<String>,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid scenario file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_scenario() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "viewer": {"placement": {"policy": "snapshot"}},
                "steps": [
                    {"type": "session_active"},
                    {"type": "select", "hit": {"position": [0.0, 1.0, -2.0], "anchor": "wall"}},
                    {"type": "wait", "ms": 50},
                    {"type": "session_ended"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.steps.len(), 4);
        assert_eq!(
            scenario.steps[1],
            Step::Select {
                hit: Some(HitSpec {
                    position: [0.0, 1.0, -2.0],
                    anchor: Some("wall".to_string()),
                }),
                delay_ms: 0,
            }
        );
    }

    #[test]
    fn select_without_hit_is_a_miss() {
        let step: Step = serde_json::from_str(r#"{"type": "select"}"#).unwrap();
        assert_eq!(
            step,
            Step::Select {
                hit: None,
                delay_ms: 0
            }
        );
    }

    #[test]
    fn missing_viewer_section_takes_defaults() {
        let scenario: Scenario =
            serde_json::from_str(r#"{"steps": [{"type": "session_active"}]}"#).unwrap();
        assert_eq!(scenario.viewer, ViewerOptions::default());
    }
}
