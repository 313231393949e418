//! Shared helpers for unit tests that touch the filesystem
//!
//! Integration tests have their own in `tests/integration_test_helpers.rs`.

use std::fs;
use std::path::{Path, PathBuf};

/// Switches the working directory for the lifetime of the guard.
///
/// Restores the previous directory on drop, including when a test panics.
/// Tests using it must be `#[serial]`.
pub struct DirGuard {
    original_dir: PathBuf,
}

impl DirGuard {
    pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        let original_dir = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(DirGuard { original_dir })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
