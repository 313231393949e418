/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use serde_json::Value;

/// Embed the event schema document meta-schema at compile time
/// This avoids file I/O which is not available in WASM environments
const DOCUMENT_SCHEMA_JSON: &str =
    include_str!("../../../schemas/hogtyped-document.schema.v1.json");

/// Load the schema that every event schema document must satisfy.
///
/// Returns the parsed JSON schema as a `serde_json::Value`.
///
/// # Panics
///
/// Panics if the embedded schema JSON is invalid (this should never happen).
#[must_use]
pub fn load_document_schema() -> Value {
    serde_json::from_str(DOCUMENT_SCHEMA_JSON)
        .expect("Failed to parse embedded document schema - this should never happen")
}
