use thiserror::Error;

/// Intake-level failures. Upload failures are not errors at this level:
/// they surface as the attachment's `Failed` status instead.
#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}
