//! Compile-time host settings.
//!
//! The host takes no arguments and reads no configuration files: the browser launches it
//! with a fixed command line, so everything it needs is baked in here.

use std::time::Duration;

/// Name the extension passes to `chrome.runtime.sendNativeMessage`.
pub const HOST_NAME: &str = "com.persephone.host";

/// Human-readable description written into the host manifest.
pub const HOST_DESCRIPTION: &str = "Persephone native messaging host for MacWhisper integration";

/// Settings for the OS actions the host performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// macOS virtual key code sent to toggle dictation (96 = F5).
    pub toggle_key_code: u16,
    /// Deadline for the keypress command.
    pub toggle_timeout: Duration,
    /// Application brought back to the foreground when `refocus` is requested.
    pub refocus_app: String,
    /// Delay before the refocus activation, so the recorder grabs focus first.
    pub refocus_delay: Duration,
    /// Deadline for the clipboard read.
    pub clipboard_timeout: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            toggle_key_code: 96,
            toggle_timeout: Duration::from_secs(5),
            refocus_app: "Google Chrome".to_string(),
            refocus_delay: Duration::from_millis(300),
            clipboard_timeout: Duration::from_secs(3),
        }
    }
}
