//! Turning one decoded request into exactly one response.
//!
//! | input                          | response                                          |
//! |--------------------------------|---------------------------------------------------|
//! | nothing on stdin               | `{"success":false,"error":"No message received"}` |
//! | `{"action":"toggle"}`          | `{"success":<keypress ok>}`                       |
//! | `{"action":"get_clipboard"}`   | `{"success":true,"text":..}` or an error          |
//! | anything else                  | `{"success":false,"error":"Unknown action: .."}`  |
//!
//! Failures of the underlying OS action never escape: they become `success: false` and a
//! line on stderr.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::automation::Automation;
use crate::host::{encode_message, NmError};

/// What the extension asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Toggle { refocus: bool },
    GetClipboard,
    /// Unrecognised or missing `action`; holds the value as it will be reported back.
    Unknown(String),
}

impl Action {
    pub fn from_message(message: &Value) -> Self {
        match message.get("action") {
            Some(Value::String(name)) => match name.as_str() {
                "toggle" => Action::Toggle {
                    refocus: message
                        .get("refocus")
                        .and_then(Value::as_bool)
                        .unwrap_or(false),
                },
                "get_clipboard" => Action::GetClipboard,
                other => Action::Unknown(other.to_string()),
            },
            Some(other) => Action::Unknown(other.to_string()),
            None => Action::Unknown("null".to_string()),
        }
    }
}

/// The single reply written back to the extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Response {
    pub fn status(success: bool) -> Self {
        Self {
            success,
            error: None,
            text: None,
        }
    }

    pub fn text(text: String) -> Self {
        Self {
            success: true,
            error: None,
            text: Some(text),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            text: None,
        }
    }
}

/// Run the requested action and build its response.
pub async fn dispatch<A: Automation>(action: Action, automation: &A) -> Response {
    match action {
        Action::Toggle { refocus } => Response::status(toggle(refocus, automation).await),
        Action::GetClipboard => match automation.read_clipboard().await {
            Ok(text) => Response::text(text),
            Err(e) => {
                warn!(error = %e, "clipboard read failed");
                Response::failure("Failed to read clipboard")
            }
        },
        Action::Unknown(name) => {
            warn!(action = %name, "unknown action");
            Response::failure(format!("Unknown action: {name}"))
        }
    }
}

async fn toggle<A: Automation>(refocus: bool, automation: &A) -> bool {
    if let Err(e) = automation.press_toggle_key().await {
        warn!(error = %e, "toggle keypress failed");
        return false;
    }
    if refocus {
        // Outcome of the reactivation is not part of the response.
        match automation.reactivate_later() {
            Ok(()) => debug!("refocus scheduled"),
            Err(e) => warn!(error = %e, "could not schedule refocus"),
        }
    }
    true
}

/// Map the result of reading stdin to a response.
///
/// An empty stream and a malformed frame still produce a response.
pub async fn respond<A: Automation>(
    incoming: Result<Option<Value>, NmError>,
    automation: &A,
) -> Response {
    match incoming {
        Ok(Some(message)) => {
            let action = Action::from_message(&message);
            info!(?action, "handling request");
            dispatch(action, automation).await
        }
        Ok(None) | Err(NmError::Disconnected) => Response::failure("No message received"),
        Err(e) => {
            warn!(error = %e, "malformed request");
            Response::failure(format!("Invalid message: {e}"))
        }
    }
}

/// Frame a response, replacing it with a short error if it exceeds the browser limit.
pub fn encode_response(response: &Response) -> Result<Vec<u8>, NmError> {
    match encode_message(response) {
        Err(NmError::OutgoingTooLarge { len, max }) => {
            warn!(len, max, "response too large for the browser");
            encode_message(&Response::failure("Response too large"))
        }
        other => other,
    }
}
