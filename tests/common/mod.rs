use std::{collections::HashMap, env};
use tempfile::TempDir;

/// Env guard that restores previous env vars on drop.
pub struct EnvGuard {
    old: HashMap<String, Option<String>>,
}

impl EnvGuard {
    pub fn set(vars: &[(&str, String)]) -> Self {
        let mut old = HashMap::new();
        for (k, v) in vars {
            old.insert((*k).to_string(), env::var(k).ok());
            env::set_var(k, v);
        }
        Self { old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, prev) in self.old.drain() {
            match prev {
                Some(v) => env::set_var(k, v),
                None => env::remove_var(k),
            }
        }
    }
}

/// Temp sandbox with HOME pointed inside it, so user-scope installs never touch the
/// real profile.
pub fn sandbox_home() -> (TempDir, EnvGuard) {
    let td = TempDir::new().expect("tempdir");
    let home = td.path().join("home");
    std::fs::create_dir_all(&home).unwrap();

    let guard = EnvGuard::set(&[("HOME", home.to_string_lossy().to_string())]);
    (td, guard)
}
