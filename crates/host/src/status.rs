//! Status reporting sink for user-facing instruction text.

/// Fire-and-forget sink for free-text status updates.
///
/// The exact wording is not part of any contract, only that an update occurs.
/// Consumers hold the sink as an `Option`; absence just skips the side effect.
pub trait StatusSink: Send + Sync {
    fn report_status(&self, message: &str);
}

/// Sink that forwards status text to the `tracing` log.
#[derive(Debug, Default)]
pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn report_status(&self, message: &str) {
        tracing::info!(target: "placard::status", "{message}");
    }
}
