use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Uploading,
    Succeeded,
    Failed,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Uploading => "uploading",
            UploadStatus::Succeeded => "succeeded",
            UploadStatus::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "uploading" => Some(UploadStatus::Uploading),
            "succeeded" => Some(UploadStatus::Succeeded),
            "failed" => Some(UploadStatus::Failed),
            _ => None,
        }
    }

    /// Terminal statuses change only through whole-record removal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Succeeded | UploadStatus::Failed)
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file admitted into the composer, tracked through its upload.
///
/// `id` and `mime_category` are assigned once at intake and never change.
/// `remote_path` is `Some` exactly when `status` is `Succeeded`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    pub mime_category: String,
    pub status: UploadStatus,
    pub remote_path: Option<String>,
    #[serde(skip)]
    pub data: Bytes,
    pub created_at: DateTime<Utc>,
}

/// A raw file offered to intake, before validation.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub mime_type: String,
    pub data: Bytes,
}
