use flowchat_core::ComposerError;

use crate::config::ComposerConfig;

/// Lower-cased extension of a filename, `None` when there is none.
pub fn file_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Leading segment of a declared MIME type, e.g. "image" for "image/png".
pub fn mime_category(mime_type: &str) -> String {
    mime_type.split('/').next().unwrap_or("").to_string()
}

/// Check a filename against the configured allow-list.
///
/// Returns the normalized extension on success.
pub fn validate(name: &str, config: &ComposerConfig) -> Result<String, ComposerError> {
    match file_extension(name) {
        Some(ext) if config.allows(&ext) => Ok(ext),
        Some(ext) => Err(ComposerError::UnsupportedFormat(ext)),
        None => Err(ComposerError::UnsupportedFormat(name.to_string())),
    }
}
