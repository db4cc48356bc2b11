pub mod alert;
pub mod composer;
pub mod config;
pub mod intake;

pub use alert::{AlertSink, TracingAlertSink};
pub use composer::{send_allowed, Composer, SendKeypress};
pub use config::ComposerConfig;
