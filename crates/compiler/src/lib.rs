//! HogTyped Compiler Library
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! This library turns JSON Schema event definitions into a generation plan for
//! typed analytics wrappers: documents are parsed, `$ref`/`allOf` are resolved,
//! and every event is projected onto language-neutral static types.
//! It works only with in-memory data (no file I/O); file contents are supplied
//! through a [`DocumentSource`].
//!
//! # Example
//!
//! ```rust,no_run
//! use hogtyped_compiler::{build_plan, load_events, MemorySource, PlanOptions};
//! use std::path::PathBuf;
//!
//! let source = MemorySource::new().with_file(
//!     "schemas/events.schema.json",
//!     r#"{
//!         "events": {
//!             "user_signed_up": {
//!                 "type": "object",
//!                 "properties": {"plan": {"type": "string", "enum": ["free", "pro"]}},
//!                 "required": ["plan"]
//!             }
//!         }
//!     }"#,
//! );
//!
//! let set = load_events(&[PathBuf::from("schemas/events.schema.json")], &source)?;
//! let plan = build_plan(&set, PlanOptions::default())?;
//! assert_eq!(plan.event_names(), vec!["user_signed_up"]);
//! # Ok::<(), hogtyped_compiler::CompilerError>(())
//! ```

pub mod client;
pub mod error;
pub mod fragment;
pub mod ir;
pub mod loader;
pub mod parser;
pub mod projector;
pub mod resolver;
pub mod schemas;
pub mod validator;

// Re-export the main types for the public API
pub use client::{
    AnalyticsClient, CaptureError, EventProperties, SchemaTable, TypedClient, ValidationMode,
};
pub use error::CompilerError;
pub use fragment::SchemaFragment;
pub use ir::{build_plan, EventDecl, GenerationPlan, PlanOptions};
pub use loader::{load_events, ResolvedEvent, SchemaSet};
pub use projector::{event_name_to_type, project_type, FieldDecl, TypeExpr};
pub use resolver::{DocumentSource, MemorySource, MissingReference, Resolver};
pub use validator::Validator;

use std::path::Path;

/// Parse an event schema document from a string.
///
/// This function works on in-memory strings only (no file I/O).
/// `file_path` selects the format (`.yaml`/`.yml` is YAML, anything else
/// JSON) and is attached to any error.
///
/// # Errors
///
/// Returns `ParseError` if the input is invalid or not shaped like a
/// schema document.
pub fn parse_document(content: &str, file_path: &str) -> Result<serde_json::Value, CompilerError> {
    parser::parse_schema_document(content, Path::new(file_path))
        .map(|document| document.root)
        .map_err(|e| CompilerError::Parse(error::ParseError::from_parser(file_path, e)))
}
