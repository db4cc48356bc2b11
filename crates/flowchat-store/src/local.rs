use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::{attachment_key, TransportConfig, TransportError, UploadTransport};

/// Filesystem-backed transport. Files land under the base directory at the
/// same key that is returned as the remote path.
pub struct LocalTransport {
    base_dir: PathBuf,
}

impl LocalTransport {
    pub fn new(config: &TransportConfig) -> Self {
        let base_dir = config
            .local_data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

fn default_data_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("flowchat")
}

#[async_trait]
impl UploadTransport for LocalTransport {
    async fn upload(
        &self,
        flow_id: &str,
        attachment_id: &str,
        filename: &str,
        data: Bytes,
    ) -> Result<String, TransportError> {
        if filename.is_empty() || filename.contains("..") {
            return Err(TransportError::Rejected(format!(
                "invalid filename: {filename:?}"
            )));
        }
        let key = attachment_key(flow_id, attachment_id, filename);
        let path = self.resolve(&key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| TransportError::Internal(format!("mkdir: {e}")))?;
        }
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| TransportError::Internal(format!("write {}: {e}", path.display())))?;
        debug!("stored attachment {attachment_id} at {key}");
        Ok(key)
    }
}
