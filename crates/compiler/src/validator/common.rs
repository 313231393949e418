/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::validator::error::{convert_jsonschema_error, ValidationError};

/// Validate `data` against `schema`, one `ValidationError` per violation.
///
/// A schema that fails to compile is reported as a single error against
/// `file_path` rather than aborting.
pub fn schema_errors(schema: &Value, file_path: &str, data: &Value) -> Vec<ValidationError> {
    let compiled = match JSONSchema::compile(schema) {
        Ok(compiled) => compiled,
        Err(err) => {
            return vec![ValidationError {
                file: file_path.to_string(),
                line: None,
                column: None,
                message: format!("Failed to compile schema: {err}"),
                path: None,
                suggestion: None,
            }];
        }
    };

    let errors: Vec<ValidationError> = match compiled.validate(data) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|error| convert_jsonschema_error(file_path, &error))
            .collect(),
    };
    errors
}
