//! Schema file discovery and filesystem access for the compiler

use crate::error::{CliError, CliResult};
use hogtyped_compiler::error::ParseError;
use hogtyped_compiler::DocumentSource;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Default glob for schema files, relative to the working directory.
pub const DEFAULT_SCHEMA_PATTERN: &str = "./schemas/*.schema.json";

/// Reads schema documents straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn read(&self, path: &Path) -> Result<Option<String>, ParseError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ParseError::Read {
                file: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Expand `pattern` into the schema files it matches, in lexicographic order.
///
/// Matching nothing is not an error.
pub fn discover_schema_files(pattern: &str) -> CliResult<Vec<PathBuf>> {
    let entries = glob::glob(pattern)
        .map_err(|e| CliError::Message(format!("Invalid schema pattern '{pattern}': {e}")))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CliError::Io(e.into()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    tracing::debug!(pattern, count = files.len(), "discovered schema files");
    Ok(files)
}

/// Read and parse one schema document.
pub fn read_document(path: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Message(format!("Failed to read {}: {e}", path.display())))?;
    Ok(hogtyped_compiler::parse_document(
        &content,
        &path.display().to_string(),
    )?)
}

/// The deepest directory of `pattern` that contains no glob syntax.
///
/// This is what watch mode subscribes to.
pub fn watch_root(pattern: &str) -> PathBuf {
    let path = Path::new(pattern);
    let mut root = PathBuf::new();
    let mut has_glob = false;

    for component in path.components() {
        let is_glob = match component {
            Component::Normal(part) => part
                .to_str()
                .is_some_and(|s| s.contains(['*', '?', '[', '{'])),
            _ => false,
        };
        if is_glob {
            has_glob = true;
            break;
        }
        root.push(component);
    }

    if !has_glob {
        root = path.parent().map(Path::to_path_buf).unwrap_or_default();
    }

    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}
