use crate::attachment::{Attachment, UploadStatus};

/// The outcome an upload task reports back, once per attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Succeeded(String),
    Failed,
}

/// A settlement event keyed by attachment id.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub id: String,
    pub outcome: Settled,
}

impl Settlement {
    pub fn succeeded(id: impl Into<String>, remote_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            outcome: Settled::Succeeded(remote_path.into()),
        }
    }

    pub fn failed(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            outcome: Settled::Failed,
        }
    }
}

/// Ordered, id-indexed collection of attachment records.
///
/// Insertion order is intake order and is preserved by every operation.
/// All mutation goes through id-keyed merges so that settlements arriving
/// in any order compose correctly; a settlement for an id that is no
/// longer present is a no-op.
#[derive(Debug, Clone, Default)]
pub struct AttachmentRegistry {
    records: Vec<Attachment>,
}

impl AttachmentRegistry {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record. Ids are assigned by intake and assumed unique.
    pub fn insert(&mut self, record: Attachment) {
        debug_assert!(
            self.get(&record.id).is_none(),
            "duplicate attachment id {}",
            record.id
        );
        self.records.push(record);
    }

    pub fn get(&self, id: &str) -> Option<&Attachment> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Remove a record by id. Absent ids are ignored; the underlying
    /// upload (if still in flight) settles later as a no-op.
    pub fn remove(&mut self, id: &str) {
        self.records.retain(|r| r.id != id);
    }

    /// Read-only ordered view of the current records.
    pub fn snapshot(&self) -> &[Attachment] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Pure reducer: fold one settlement into the previous registry value.
    ///
    /// The merge is keyed by id against whatever the registry holds *now*,
    /// never against a copy captured when the upload was dispatched, so two
    /// settlements landing back-to-back can never clobber each other.
    pub fn apply(mut previous: Self, settlement: Settlement) -> Self {
        previous.settle(settlement);
        previous
    }

    /// In-place form of [`AttachmentRegistry::apply`]. Returns whether a
    /// record was updated; `false` means the id was already gone (deleted
    /// or cleared by a submit) and the settlement was absorbed.
    pub fn settle(&mut self, settlement: Settlement) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == settlement.id) else {
            return false;
        };
        match settlement.outcome {
            Settled::Succeeded(path) => {
                record.status = UploadStatus::Succeeded;
                record.remote_path = Some(path);
            }
            Settled::Failed => {
                record.status = UploadStatus::Failed;
                record.remote_path = None;
            }
        }
        true
    }

    /// Remote paths of successfully uploaded attachments, in intake order.
    pub fn uploaded_paths(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.status == UploadStatus::Succeeded)
            .filter_map(|r| r.remote_path.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use chrono::Utc;

    use super::*;

    fn record(id: &str) -> Attachment {
        Attachment {
            id: id.into(),
            filename: format!("{id}.png"),
            mime_category: "image".into(),
            status: UploadStatus::Uploading,
            remote_path: None,
            data: Bytes::from_static(b"bytes"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_preserves_intake_order() {
        let mut registry = AttachmentRegistry::new();
        registry.insert(record("a"));
        registry.insert(record("b"));
        registry.insert(record("c"));

        let ids: Vec<&str> = registry.snapshot().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn settle_success_sets_status_and_path() {
        let mut registry = AttachmentRegistry::new();
        registry.insert(record("a"));

        assert!(registry.settle(Settlement::succeeded("a", "flows/f/a.png")));

        let a = registry.get("a").unwrap();
        assert_eq!(a.status, UploadStatus::Succeeded);
        assert_eq!(a.remote_path.as_deref(), Some("flows/f/a.png"));
    }

    #[test]
    fn settle_failure_leaves_no_path() {
        let mut registry = AttachmentRegistry::new();
        registry.insert(record("a"));

        assert!(registry.settle(Settlement::failed("a")));

        let a = registry.get("a").unwrap();
        assert_eq!(a.status, UploadStatus::Failed);
        assert!(a.remote_path.is_none());
    }

    #[test]
    fn settle_unknown_id_is_noop() {
        let mut registry = AttachmentRegistry::new();
        registry.insert(record("a"));

        assert!(!registry.settle(Settlement::succeeded("gone", "flows/f/x.png")));
        assert_eq!(registry.get("a").unwrap().status, UploadStatus::Uploading);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn out_of_order_settlements_both_land() {
        let mut registry = AttachmentRegistry::new();
        registry.insert(record("a"));
        registry.insert(record("b"));

        // b (dispatched second) settles first
        registry = AttachmentRegistry::apply(registry, Settlement::succeeded("b", "flows/f/b.png"));
        registry = AttachmentRegistry::apply(registry, Settlement::failed("a"));

        assert_eq!(registry.get("a").unwrap().status, UploadStatus::Failed);
        assert_eq!(registry.get("b").unwrap().status, UploadStatus::Succeeded);
        assert_eq!(
            registry.get("b").unwrap().remote_path.as_deref(),
            Some("flows/f/b.png")
        );
    }

    #[test]
    fn settle_touches_only_the_matching_record() {
        let mut registry = AttachmentRegistry::new();
        registry.insert(record("a"));
        registry.insert(record("b"));

        registry.settle(Settlement::succeeded("a", "flows/f/a.png"));

        let b = registry.get("b").unwrap();
        assert_eq!(b.status, UploadStatus::Uploading);
        assert!(b.remote_path.is_none());
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let mut registry = AttachmentRegistry::new();
        registry.insert(record("a"));
        registry.remove("missing");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn uploaded_paths_keeps_order_and_skips_unfinished() {
        let mut registry = AttachmentRegistry::new();
        registry.insert(record("a"));
        registry.insert(record("b"));
        registry.insert(record("c"));
        registry.insert(record("d"));

        registry.settle(Settlement::succeeded("c", "flows/f/c.png"));
        registry.settle(Settlement::failed("b"));
        registry.settle(Settlement::succeeded("a", "flows/f/a.png"));
        // d still uploading

        assert_eq!(registry.uploaded_paths(), ["flows/f/a.png", "flows/f/c.png"]);
    }

    #[test]
    fn clear_empties_registry_and_absorbs_late_settlement() {
        let mut registry = AttachmentRegistry::new();
        registry.insert(record("a"));
        registry.clear();
        assert!(registry.is_empty());

        assert!(!registry.settle(Settlement::succeeded("a", "flows/f/a.png")));
        assert!(registry.is_empty());
    }
}
