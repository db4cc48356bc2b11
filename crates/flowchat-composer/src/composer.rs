use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Utc;
use flowchat_core::{
    Attachment, AttachmentRegistry, ComposerError, FileUpload, IdGenerator, SendEvent, Settlement,
    UploadStatus,
};
use flowchat_store::UploadTransport;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::alert::{AlertSink, UNSUPPORTED_FORMAT_TEXT, UPLOAD_ERROR_TITLE};
use crate::config::ComposerConfig;
use crate::intake;

/// Keypress state relevant to the submit gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendKeypress {
    pub enter: bool,
    pub shift: bool,
    pub composing: bool,
}

/// Whether a keypress should trigger a send: an unmodified Enter outside of
/// IME composition, while the composer is neither locked nor saving.
pub fn send_allowed(locked: bool, saving: bool, key: &SendKeypress) -> bool {
    key.enter && !locked && !saving && !key.shift && !key.composing
}

/// The message composer's attachment tracker.
///
/// Files enter through [`Composer::intake`], which validates them, records
/// them as `Uploading`, and dispatches one upload task each. Tasks settle in
/// any order; each settlement is merged into the registry by id against its
/// current value, so overlapping completions never lose an update. A
/// settlement whose id has been removed (user deletion or a submit's clear)
/// is absorbed silently.
pub struct Composer {
    config: ComposerConfig,
    transport: Arc<dyn UploadTransport>,
    alerts: Arc<dyn AlertSink>,
    ids: IdGenerator,
    registry: Arc<Mutex<AttachmentRegistry>>,
    repeat_count: AtomicU32,
    value: Mutex<String>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl Composer {
    pub fn new(
        config: ComposerConfig,
        transport: Arc<dyn UploadTransport>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            config,
            transport,
            alerts,
            ids: IdGenerator::new(),
            registry: Arc::new(Mutex::new(AttachmentRegistry::new())),
            repeat_count: AtomicU32::new(1),
            value: Mutex::new(String::new()),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Validate a file and admit it into the registry.
    ///
    /// On success the attachment is recorded as `Uploading`, an upload task
    /// is dispatched, and the new id is returned. A disallowed extension
    /// raises exactly one alert and leaves the registry untouched.
    pub async fn intake(&self, file: FileUpload) -> Result<String, ComposerError> {
        if let Err(e) = intake::validate(&file.name, &self.config) {
            self.alerts.report(
                UPLOAD_ERROR_TITLE,
                &[
                    UNSUPPORTED_FORMAT_TEXT.to_string(),
                    self.config.allowed_extensions.join(", "),
                ],
            );
            return Err(e);
        }

        let id = self.ids.next();
        let record = Attachment {
            id: id.clone(),
            filename: file.name.clone(),
            mime_category: intake::mime_category(&file.mime_type),
            status: UploadStatus::Uploading,
            remote_path: None,
            data: file.data.clone(),
            created_at: Utc::now(),
        };
        self.registry.lock().await.insert(record);

        info!("attachment {id} admitted ({})", file.name);
        self.dispatch_upload(id.clone(), file).await;
        Ok(id)
    }

    /// Spawn the upload task for an admitted attachment. The task merges its
    /// settlement into whatever the registry holds at settlement time.
    async fn dispatch_upload(&self, id: String, file: FileUpload) {
        let transport = Arc::clone(&self.transport);
        let registry = Arc::clone(&self.registry);
        let flow_id = self.config.flow_id.clone();

        let handle = tokio::spawn(async move {
            let settlement = match transport
                .upload(&flow_id, &id, &file.name, file.data)
                .await
            {
                Ok(path) => {
                    debug!("upload for attachment {id} settled at {path}");
                    Settlement::succeeded(id.clone(), path)
                }
                Err(e) => {
                    warn!("upload for attachment {id} failed: {e}");
                    Settlement::failed(id.clone())
                }
            };
            if !registry.lock().await.settle(settlement) {
                debug!("settlement for {id} arrived after removal; ignored");
            }
        });
        self.pending.lock().await.push(handle);
    }

    /// Remove an attachment. The underlying transport call, if still in
    /// flight, cannot be cancelled; its settlement later finds no record.
    pub async fn remove(&self, id: &str) {
        self.registry.lock().await.remove(id);
        debug!("attachment {id} removed");
    }

    /// Ordered copy of the current attachment records.
    pub async fn snapshot(&self) -> Vec<Attachment> {
        self.registry.lock().await.snapshot().to_vec()
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count.load(Ordering::Relaxed)
    }

    /// Set how many times the message should be sent. Clamped to at least 1.
    pub fn set_repeat_count(&self, count: u32) {
        self.repeat_count.store(count.max(1), Ordering::Relaxed);
    }

    pub async fn value(&self) -> String {
        self.value.lock().await.clone()
    }

    pub async fn set_value(&self, text: impl Into<String>) {
        *self.value.lock().await = text.into();
    }

    /// Assemble the send event and clear the registry.
    ///
    /// Only attachments with a confirmed remote path are included, in intake
    /// order. The clear is unconditional: in-flight and failed attachments
    /// are dropped, and their late settlements become no-ops.
    pub async fn send(&self) -> SendEvent {
        let mut registry = self.registry.lock().await;
        let attachment_paths = registry.uploaded_paths();
        let dropped = registry.len() - attachment_paths.len();
        if dropped > 0 {
            debug!("send discarding {dropped} unfinished attachment(s)");
        }
        registry.clear();
        SendEvent {
            repeat_count: self.repeat_count(),
            attachment_paths,
        }
    }

    /// Wait for every dispatched upload task to settle.
    pub async fn flush(&self) {
        loop {
            let handles = std::mem::take(&mut *self.pending.lock().await);
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!("upload task aborted: {e}");
                }
            }
        }
    }
}
