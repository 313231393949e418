/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Parser for event schema documents.
 */

use crate::parser::error::ParseError;
use crate::parser::utils::parse_document_content;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A parsed schema document.
///
/// Keeps the whole JSON tree so that `#/...` pointers can walk any part of
/// it, not only `definitions`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub path: PathBuf,
    pub root: Value,
}

impl SchemaDocument {
    /// Event entries in document order. Missing `events` yields nothing.
    pub fn events(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.root
            .get("events")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(Map::iter)
    }

    /// Named `$ref` targets declared under `definitions`.
    pub fn definitions(&self) -> Option<&Map<String, Value>> {
        self.root.get("definitions").and_then(Value::as_object)
    }

    pub fn event_count(&self) -> usize {
        self.events().count()
    }
}

/// Parse an event schema document from a string.
///
/// # Errors
///
/// Returns `ParseError` if:
/// - The content is invalid JSON (or YAML for `.yaml`/`.yml` paths)
/// - The document root is not an object
/// - `events` or `definitions` is present but not an object
pub fn parse_schema_document(content: &str, path: &Path) -> Result<SchemaDocument, ParseError> {
    let display = path.to_string_lossy();
    let root = parse_document_content(content, &display)?;

    if !root.is_object() {
        return Err(ParseError::InvalidFieldType(
            "Invalid schema document: expected an object".to_string(),
        ));
    }

    for field in ["events", "definitions"] {
        if let Some(value) = root.get(field) {
            if !value.is_object() {
                return Err(ParseError::InvalidFieldType(format!(
                    "Invalid schema document: \"{field}\" must be an object"
                )));
            }
        }
    }

    Ok(SchemaDocument {
        path: path.to_path_buf(),
        root,
    })
}
