/// Extensions accepted by intake when no explicit allow-list is configured.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Per-session composer configuration.
///
/// The flow id identifies the session the uploads belong to; it is passed
/// explicitly rather than read from shared ambient state.
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    pub flow_id: String,
    pub allowed_extensions: Vec<String>,
}

impl ComposerConfig {
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self {
            flow_id: flow_id.into(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }

    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive membership test against the allow-list.
    pub fn allows(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}
