//! # persephone_host
//!
//! Native messaging host for the Persephone browser extension.
//!
//! The extension calls `chrome.runtime.sendNativeMessage("com.persephone.host", ..)`; the
//! browser starts this binary, writes one request to its stdin and reads one reply from
//! its stdout. The host then exits.
//!
//! ## Wire protocol
//!
//! 1. A **4-byte length prefix** (`u32`) in **native endianness**.
//! 2. **That many bytes** of UTF-8 JSON.
//!
//! Requests:
//!
//! - `{"action": "toggle", "refocus": bool}` presses the MacWhisper dictation key (F5).
//!   With `refocus`, the browser is brought back to the front shortly afterwards.
//! - `{"action": "get_clipboard"}` returns the clipboard text.
//!
//! Replies are `{"success": bool}` plus either `"error"` or `"text"`.
//!
//! **Never log to stdout:** stdout is reserved for framed protocol messages. Diagnostics
//! go through `tracing` to stderr (see [`logging`]).
//!
//! ## Pure framing
//!
//! ```rust
//! use persephone_host::host::{encode_message, read_message};
//! use serde_json::json;
//! use std::io::Cursor;
//!
//! let msg = json!({"action": "toggle"});
//! let frame = encode_message(&msg).unwrap();
//!
//! let mut cur = Cursor::new(frame);
//! assert_eq!(read_message(&mut cur).unwrap(), Some(msg));
//! ```
//!
//! ## Crate layout
//!
//! - [`host`] — framing + stdio helpers.
//! - [`dispatch`] — request decoding and the action decision table.
//! - [`automation`] — the OS capabilities (keypress, refocus, clipboard).
//! - [`command`] — bounded and detached external command execution.
//! - [`config`] — built-in settings.
//! - `install` — manifest install/verify/remove (feature `install`).

pub mod automation;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod host;
#[cfg(feature = "install")]
pub mod install;
pub mod logging;

// -------- Host re-exports --------

#[doc(inline)]
pub use host::{encode_message, get_message, read_message, send_message, write_message, NmError};

#[doc(inline)]
pub use dispatch::{dispatch, respond, Action, Response};

// -------- Install re-exports --------

#[cfg(feature = "install")]
#[doc(inline)]
pub use install::{install, remove, verify_installed, Scope};
