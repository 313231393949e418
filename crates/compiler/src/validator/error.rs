/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use serde::{Deserialize, Serialize};

/// A problem found in an event schema document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    pub file: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub message: String,
    pub path: Option<String>,
    pub suggestion: Option<String>,
}

/// Outcome of validating one or more documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Build a result from the errors found; valid when there are none.
    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Convert a jsonschema ValidationError to our ValidationError format.
///
/// The `jsonschema` crate reports instance paths but not source positions,
/// so `line` and `column` are always `None`.
pub fn convert_jsonschema_error(
    file_path: &str,
    error: &jsonschema::ValidationError,
) -> ValidationError {
    let instance_path = error.instance_path.to_string();
    let message = error.to_string();

    ValidationError {
        file: file_path.to_string(),
        line: None,
        column: None,
        message,
        path: if instance_path.is_empty() {
            None
        } else {
            Some(instance_path)
        },
        suggestion: generate_suggestion_from_error(error),
    }
}

/// Suggest a fix for the schema keywords event documents most often get wrong.
fn generate_suggestion_from_error(error: &jsonschema::ValidationError) -> Option<String> {
    // Use Debug formatting to get the keyword name
    let keyword = format!("{:?}", error.kind);
    let path = error.instance_path.to_string();

    let is_event_root = path.starts_with("/events/") && path.matches('/').count() == 2;

    if is_event_root && keyword.contains("Type") {
        Some("Each event must be a JSON Schema object, e.g. {\"type\": \"object\", \"properties\": {}}".to_string())
    } else if keyword.contains("Enum") || keyword.contains("AnyOf") {
        Some("Use one of: object, array, string, number, integer, boolean, null".to_string())
    } else if keyword.contains("UniqueItems") {
        Some("Remove the repeated name from 'required'".to_string())
    } else if keyword.contains("MinItems") {
        Some("'allOf' needs at least one sub-schema".to_string())
    } else if keyword.contains("Type") {
        Some("Check the field type matches the schema".to_string())
    } else {
        None
    }
}
