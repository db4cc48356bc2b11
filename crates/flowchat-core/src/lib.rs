pub mod attachment;
pub mod error;
pub mod id;
pub mod registry;
pub mod send;

pub use attachment::{Attachment, FileUpload, UploadStatus};
pub use error::ComposerError;
pub use id::IdGenerator;
pub use registry::{AttachmentRegistry, Settled, Settlement};
pub use send::SendEvent;
