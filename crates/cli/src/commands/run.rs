//! The `run` command: replay a scenario and print the resulting placement.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use placard::{Viewer, ViewerOptions};
use placard_host::sim::SimHost;
use placard_host::{SamplePoint, SessionState, StatusSink, Transform, Vec3};

use crate::cli::PolicyArg;
use crate::scenario::{Scenario, Step};

/// Pause between delivered events so the viewer's loops keep up, and again
/// before the summary so in-flight hit tests can resolve.
const STEP_PAUSE: Duration = Duration::from_millis(10);
const SETTLE: Duration = Duration::from_millis(100);

/// Status sink that prints instruction text to stdout, like the DOM
/// instruction element in a real integration.
struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn report_status(&self, message: &str) {
        println!("status: {message}");
    }
}

/// Final placement state printed as JSON after the replay.
#[derive(Debug, Serialize)]
struct RunSummary {
    session_state: SessionState,
    placed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    transform: Option<Transform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anchor: Option<String>,
    commits: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn run(
    path: &Path,
    policy: Option<PolicyArg>,
    sample_point: Option<SamplePoint>,
) -> anyhow::Result<()> {
    let scenario = Scenario::load(path)?;

    let mut options: ViewerOptions = scenario.viewer.clone();
    if let Some(policy) = policy {
        options.placement.policy = policy.into();
    }
    if let Some(sample_point) = sample_point {
        options.placement.sample_point = sample_point;
    }

    let host = Arc::new(SimHost::new());
    if let Some(Step::FailStart { message }) = scenario.steps.first() {
        host.fail_next_start(message.clone());
    }

    let status: Arc<dyn StatusSink> = Arc::new(ConsoleStatus);
    let viewer = match Viewer::launch(host.clone(), Some(status), options).await {
        Ok(viewer) => viewer,
        Err(err) if err.is_session_init() => {
            // Reported through the status sink already; the replay itself
            // succeeded, so summarize and exit cleanly.
            print_summary(&RunSummary {
                session_state: SessionState::Ended,
                placed: false,
                transform: None,
                anchor: None,
                commits: 0,
                error: Some(err.to_string()),
            })?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    for (index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(index, ?step, "replaying step");
        match step {
            Step::FailStart { .. } => {
                if index != 0 {
                    tracing::warn!(index, "fail_start after launch ignored");
                }
            }
            Step::SessionActive => host.emit_session_state(SessionState::Active),
            Step::SessionEnded => host.emit_session_state(SessionState::Ended),
            Step::Select { hit, delay_ms } => {
                let delay = Duration::from_millis(*delay_ms);
                match hit {
                    Some(spec) => host.push_surface(
                        Transform::at(Vec3::from(spec.position)),
                        spec.anchor.as_deref(),
                        delay,
                    ),
                    None => host.push_miss(delay),
                }
                host.emit_select();
            }
            Step::Wait { ms } => tokio::time::sleep(Duration::from_millis(*ms)).await,
        }
        tokio::time::sleep(STEP_PAUSE).await;
    }
    tokio::time::sleep(SETTLE).await;

    let poster = viewer.poster();
    let summary = RunSummary {
        session_state: viewer.session_state(),
        placed: poster.is_placed(),
        transform: poster.transform(),
        anchor: poster.anchor().map(|a| a.to_string()),
        commits: viewer.commit_count(),
        error: None,
    };
    print_summary(&summary)
}

fn print_summary(summary: &RunSummary) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn scenario_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn replays_a_placement_scenario() {
        let file = scenario_file(
            r#"{
                "steps": [
                    {"type": "session_active"},
                    {"type": "select", "hit": {"position": [0.0, 1.0, -2.0], "anchor": "wall"}},
                    {"type": "wait", "ms": 20}
                ]
            }"#,
        );

        run(file.path(), None, None).await.unwrap();
    }

    #[tokio::test]
    async fn replays_a_failed_start() {
        let file = scenario_file(
            r#"{
                "steps": [
                    {"type": "fail_start", "message": "no AR support"}
                ]
            }"#,
        );

        run(file.path(), None, None).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_a_malformed_scenario() {
        let file = scenario_file(r#"{"steps": [{"type": "teleport"}]}"#);
        assert!(run(file.path(), None, None).await.is_err());
    }
}
