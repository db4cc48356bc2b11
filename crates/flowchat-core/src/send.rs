use serde::{Deserialize, Serialize};

/// The event handed to the outer messaging flow on submit.
///
/// `attachment_paths` holds the confirmed remote paths of successfully
/// uploaded attachments, in intake order. Attachments still uploading or
/// failed at submit time are not included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEvent {
    pub repeat_count: u32,
    pub attachment_paths: Vec<String>,
}
