mod local;

pub use local::LocalTransport;

use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("upload rejected: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Internal(String),
}

/// The endpoint an upload task hands a file to.
///
/// On success the transport returns the remote storage path under which the
/// file can later be referenced by the send event.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn upload(
        &self,
        flow_id: &str,
        attachment_id: &str,
        filename: &str,
        data: Bytes,
    ) -> Result<String, TransportError>;
}

// -- Key helpers --

pub fn attachment_key(flow_id: &str, attachment_id: &str, filename: &str) -> String {
    format!("flows/{flow_id}/attachments/{attachment_id}/{filename}")
}

// -- Configuration --

/// Configuration for the transport backend.
pub struct TransportConfig {
    /// Local filesystem base directory. When `None`, a default under the
    /// user data directory is used.
    pub local_data_dir: Option<String>,
}

impl TransportConfig {
    /// Build from environment variables.
    pub fn from_env() -> Self {
        Self {
            local_data_dir: std::env::var("FLOWCHAT_DATA_DIR").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_helper_produces_expected_path() {
        assert_eq!(
            attachment_key("flow-1", "att-9", "photo.png"),
            "flows/flow-1/attachments/att-9/photo.png"
        );
    }

    // Mutates a process-wide env var; keep as a single sequential test.
    #[test]
    fn config_from_env_reads_data_dir() {
        std::env::remove_var("FLOWCHAT_DATA_DIR");
        assert!(TransportConfig::from_env().local_data_dir.is_none());

        std::env::set_var("FLOWCHAT_DATA_DIR", "/srv/flowchat");
        assert_eq!(
            TransportConfig::from_env().local_data_dir.as_deref(),
            Some("/srv/flowchat")
        );
        std::env::remove_var("FLOWCHAT_DATA_DIR");
    }
}
