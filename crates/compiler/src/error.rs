/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use thiserror::Error;

/// Top-level error type for the compiler
#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Events '{first}' and '{second}' both generate the type name '{type_name}'; rename one of them")]
    TypeNameCollision {
        type_name: String,
        first: String,
        second: String,
    },
}

/// Parse errors for schema documents
///
/// This is a wrapper around the parser module's `ParseError` that adds the
/// path of the document that failed to load.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid YAML in {file}: {message}")]
    InvalidYaml { file: String, message: String },

    #[error("Invalid JSON in {file}: {message}")]
    InvalidJson { file: String, message: String },

    #[error("Invalid field type in {file}: {message}")]
    InvalidFieldType { file: String, message: String },

    #[error("Failed to read {file}: {message}")]
    Read { file: String, message: String },
}

impl ParseError {
    /// Attach a file path to a parser-level error.
    pub fn from_parser(file: &str, err: crate::parser::error::ParseError) -> Self {
        let file = file.to_string();
        match err {
            crate::parser::error::ParseError::InvalidYaml(message) => {
                Self::InvalidYaml { file, message }
            }
            crate::parser::error::ParseError::InvalidJson(message) => {
                Self::InvalidJson { file, message }
            }
            crate::parser::error::ParseError::InvalidFieldType(message) => {
                Self::InvalidFieldType { file, message }
            }
        }
    }
}

/// Hard failures raised while resolving `$ref` and `allOf`.
///
/// Missing targets are not errors; they resolve to an absent schema and are
/// reported as `MissingReference` diagnostics instead.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("Unsupported reference '{reference}' in {file}: only '#/...' and relative './...' references are supported")]
    UnsupportedReference { reference: String, file: String },

    #[error("Cyclic reference detected: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    #[error("Failed to load referenced document: {0}")]
    ExternalDocument(#[from] ParseError),
}

/// Validation errors for schema documents
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),
}
