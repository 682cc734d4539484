#![cfg(all(feature = "install", any(target_os = "linux", target_os = "macos")))]

mod common;

use persephone_host::config::HOST_NAME;
use persephone_host::install::{manifest_path, InstallError, Scope};
use serial_test::serial;

#[test]
#[serial]
fn manifest_path_resolves_for_known_browsers_user_scope() {
    let (td, _env) = common::sandbox_home();
    let home = td.path().join("home");

    for key in ["chrome", "chromium", "edge", "brave", "firefox"] {
        let p = manifest_path(key, Scope::User, HOST_NAME).expect(key);
        assert!(p.starts_with(&home), "user path should live under HOME: {p:?}");
        assert!(
            p.ends_with(format!("{HOST_NAME}.json")),
            "path should end with <host>.json: {p:?}"
        );
    }
}

#[test]
#[serial]
fn system_scope_is_absolute() {
    let p = manifest_path("chrome", Scope::System, HOST_NAME).expect("chrome system");
    assert!(p.is_absolute());
}

#[test]
#[serial]
fn brave_has_no_system_location() {
    let err = manifest_path("brave", Scope::System, HOST_NAME).expect_err("no system path");
    assert!(matches!(err, InstallError::Unsupported { .. }));
}

#[test]
#[serial]
fn missing_home_is_an_error() {
    let _env = common::EnvGuard::set(&[("HOME", String::new())]);
    let err = manifest_path("chrome", Scope::User, HOST_NAME).expect_err("empty HOME");
    assert!(matches!(err, InstallError::HomeNotSet));
}
