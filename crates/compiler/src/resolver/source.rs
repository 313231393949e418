/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Document sources.
//!
//! The compiler never touches the filesystem itself. Whoever drives it
//! (the CLI, a test, a WASM host) supplies file contents through this trait.

use crate::error::ParseError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Supplies the raw text of schema documents by path.
pub trait DocumentSource {
    /// Read the document at `path`.
    ///
    /// Returns `Ok(None)` when the document does not exist, which the
    /// resolver treats as a missing reference rather than a failure.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Read` when the document exists but cannot be read.
    fn read(&self, path: &Path) -> Result<Option<String>, ParseError>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn read(&self, path: &Path) -> Result<Option<String>, ParseError> {
        (**self).read(path)
    }
}

/// In-memory source keyed by normalised path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files
            .insert(super::normalize_path(path.as_ref()), content.into());
    }

    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Paths of every stored document, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.files.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl DocumentSource for MemorySource {
    fn read(&self, path: &Path) -> Result<Option<String>, ParseError> {
        Ok(self.files.get(&super::normalize_path(path)).cloned())
    }
}
