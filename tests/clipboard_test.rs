#![cfg(unix)]

//! `MacAutomation` clipboard reads against a stand-in `pbpaste` on PATH.

mod common;

use persephone_host::automation::MacAutomation;
use persephone_host::dispatch::{dispatch, Action, Response};
use serial_test::serial;
use std::{env, fs, os::unix::fs::PermissionsExt};
use tempfile::TempDir;

/// Put an executable `pbpaste` running `script` first on PATH.
fn fake_pbpaste(script: &str) -> (TempDir, common::EnvGuard) {
    let td = TempDir::new().expect("tempdir");
    let bin = td.path().join("pbpaste");
    fs::write(&bin, format!("#!/bin/sh\n{script}\n")).unwrap();
    fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

    let path = match env::var("PATH") {
        Ok(old) => format!("{}:{old}", td.path().display()),
        Err(_) => td.path().display().to_string(),
    };
    let guard = common::EnvGuard::set(&[("PATH", path)]);
    (td, guard)
}

#[tokio::test]
#[serial]
async fn clipboard_text_is_returned_despite_nonzero_exit() {
    let (_td, _env) = fake_pbpaste("printf hello; exit 1");
    let response = dispatch(Action::GetClipboard, &MacAutomation::default()).await;
    assert_eq!(response, Response::text("hello".to_string()));
}

#[tokio::test]
#[serial]
async fn clipboard_text_on_clean_exit() {
    let (_td, _env) = fake_pbpaste("printf 'line one\\nline two'");
    let response = dispatch(Action::GetClipboard, &MacAutomation::default()).await;
    assert_eq!(response, Response::text("line one\nline two".to_string()));
}

#[tokio::test]
#[serial]
async fn missing_pbpaste_fails() {
    let td = TempDir::new().expect("tempdir");
    assert!(!td.path().join("pbpaste").exists());
    let _env = common::EnvGuard::set(&[("PATH", td.path().display().to_string())]);

    let response = dispatch(Action::GetClipboard, &MacAutomation::default()).await;
    assert_eq!(response, Response::failure("Failed to read clipboard"));
}
