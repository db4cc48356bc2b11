use tracing::warn;

pub const UPLOAD_ERROR_TITLE: &str = "Error uploading file";
pub const UNSUPPORTED_FORMAT_TEXT: &str =
    "Please ensure your file has one of the following extensions:";

/// Channel for user-visible alerts raised by the composer.
///
/// Invoked exactly once per validation failure.
pub trait AlertSink: Send + Sync {
    fn report(&self, title: &str, messages: &[String]);
}

/// Default sink that surfaces alerts through the log stream.
#[derive(Debug, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn report(&self, title: &str, messages: &[String]) {
        warn!("{title}: {}", messages.join(" "));
    }
}
