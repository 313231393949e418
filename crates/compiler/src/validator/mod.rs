/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

pub mod common;
pub mod documents;
pub mod error;

#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests;

use serde_json::Value;

use crate::schemas;
use crate::validator::documents::{
    validate_document, validate_duplicate_events, validate_type_name_collisions,
};
use crate::validator::error::{ValidationError, ValidationResult};

/// Validator for event schema documents.
/// Checks each document against the embedded document schema and for
/// references and event names that would break generation.
pub struct Validator {
    document_schema: Value,
}

impl Validator {
    /// Create a validator using the document schema embedded at compile time.
    pub fn new() -> Self {
        Self {
            document_schema: schemas::load_document_schema(),
        }
    }

    /// Create a validator that checks documents against `document_schema`.
    pub fn with_schema(document_schema: Value) -> Self {
        Self { document_schema }
    }

    /// Validate a single document.
    pub fn validate_document(&self, file_path: &str, data: &Value) -> ValidationResult {
        ValidationResult::invalid(validate_document(&self.document_schema, file_path, data))
    }

    /// Validate a set of documents, including checks across documents.
    ///
    /// Documents are `(file path, parsed content)` pairs.
    pub fn validate_documents(&self, documents: &[(String, Value)]) -> ValidationResult {
        let mut errors: Vec<ValidationError> = documents
            .iter()
            .flat_map(|(file_path, data)| {
                validate_document(&self.document_schema, file_path, data)
            })
            .collect();
        errors.extend(validate_duplicate_events(documents));
        errors.extend(validate_type_name_collisions(documents));
        ValidationResult::invalid(errors)
    }

    /// Format validation errors for display.
    pub fn format_errors(&self, errors: &[ValidationError]) -> String {
        if errors.is_empty() {
            return String::new();
        }

        let mut error_lines = vec!["✗ Validation failed\n".to_string()];

        for error in errors {
            error_lines.push(self.format_error_location(error));
            error_lines.push(format!("  Error: {}", error.message));

            if let Some(path) = &error.path {
                error_lines.push(format!("  Path: {path}"));
            }

            if let Some(suggestion) = &error.suggestion {
                error_lines.push(format!("  Suggestion: {suggestion}"));
            }

            error_lines.push(String::new());
        }

        error_lines.join("\n")
    }

    /// Format error location with file path and optional line/column.
    fn format_error_location(&self, error: &ValidationError) -> String {
        if let Some(line) = error.line {
            let column = error.column.map(|c| format!(":{c}")).unwrap_or_default();
            format!("{}:{line}{column}", error.file)
        } else {
            error.file.clone()
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
