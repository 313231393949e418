/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use crate::error::{CompilerError, ParseError};
use crate::ir::GenerationPlan;
use serde_json::{Map, Value};

/// Embedded schema table: event name to resolved schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaTable {
    schemas: Map<String, Value>,
}

impl SchemaTable {
    pub fn new(schemas: Map<String, Value>) -> Self {
        Self { schemas }
    }

    pub fn from_plan(plan: &GenerationPlan) -> Self {
        Self::new(plan.schema_table())
    }

    /// Load a table written by the `json` generator target.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidJson` if the content is not JSON, and
    /// `ParseError::InvalidFieldType` if it is not an object of objects.
    pub fn from_json_str(content: &str) -> Result<Self, CompilerError> {
        let file = "<schema table>".to_string();
        let value: Value = serde_json::from_str(content).map_err(|e| ParseError::InvalidJson {
            file: file.clone(),
            message: e.to_string(),
        })?;

        let Value::Object(schemas) = value else {
            return Err(ParseError::InvalidFieldType {
                file,
                message: "schema table must be an object keyed by event name".to_string(),
            }
            .into());
        };
        if let Some((event, _)) = schemas.iter().find(|(_, schema)| !schema.is_object()) {
            return Err(ParseError::InvalidFieldType {
                file,
                message: format!("schema for event '{event}' must be an object"),
            }
            .into());
        }
        Ok(Self { schemas })
    }

    pub fn get(&self, event: &str) -> Option<&Value> {
        self.schemas.get(event)
    }

    pub fn contains(&self, event: &str) -> bool {
        self.schemas.contains_key(event)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schemas.iter().map(|(event, schema)| (event.as_str(), schema))
    }

    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
