//! OS capabilities the dispatcher relies on.
//!
//! [`Automation`] is the seam between the decision table and the machine: the real host
//! uses [`MacAutomation`] (AppleScript through `osascript`, clipboard through `pbpaste`),
//! tests plug in a fake.

use crate::command::{CommandError, ExternalCommand};
use crate::config::HostConfig;

#[allow(async_fn_in_trait)]
pub trait Automation {
    /// Send the dictation toggle keypress and wait for it to be delivered.
    async fn press_toggle_key(&self) -> Result<(), CommandError>;

    /// Bring the browser back to the foreground after a short delay.
    ///
    /// Fire-and-forget: returns once the helper process is started.
    fn reactivate_later(&self) -> Result<(), CommandError>;

    /// Current clipboard contents as text.
    async fn read_clipboard(&self) -> Result<String, CommandError>;
}

/// macOS implementation backed by `osascript` and `pbpaste`.
#[derive(Debug, Clone, Default)]
pub struct MacAutomation {
    config: HostConfig,
}

impl MacAutomation {
    pub fn new(config: HostConfig) -> Self {
        Self { config }
    }

    pub fn toggle_command(&self) -> ExternalCommand {
        ExternalCommand::new("osascript")
            .arg("-e")
            .arg(format!(
                "tell application \"System Events\" to key code {}",
                self.config.toggle_key_code
            ))
            .timeout(self.config.toggle_timeout)
    }

    pub fn reactivate_command(&self) -> ExternalCommand {
        ExternalCommand::new("osascript")
            .arg("-e")
            .arg(format!(
                "delay {}",
                self.config.refocus_delay.as_secs_f64()
            ))
            .arg("-e")
            .arg(format!(
                "tell application \"{}\" to activate",
                self.config.refocus_app
            ))
    }

    pub fn clipboard_command(&self) -> ExternalCommand {
        // pbpaste's exit status is not meaningful; whatever it printed is the clipboard.
        ExternalCommand::new("pbpaste")
            .timeout(self.config.clipboard_timeout)
            .allow_failure()
    }
}

impl Automation for MacAutomation {
    async fn press_toggle_key(&self) -> Result<(), CommandError> {
        self.toggle_command().output().await.map(|_| ())
    }

    fn reactivate_later(&self) -> Result<(), CommandError> {
        self.reactivate_command().spawn_detached()
    }

    async fn read_clipboard(&self) -> Result<String, CommandError> {
        self.clipboard_command().output().await
    }
}
