/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Validating wrapper for Rust callers.
//!
//! The same behaviour the generated Python and TypeScript wrappers have,
//! driven by a [`SchemaTable`] instead of generated source. Delivery is left
//! entirely to the wrapped [`AnalyticsClient`].

pub mod mode;
pub mod table;


use crate::error::{CompilerError, ValidationError};
use jsonschema::JSONSchema;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use thiserror::Error;

pub use mode::ValidationMode;
pub use table::SchemaTable;

/// Properties attached to a captured event.
pub type EventProperties = Map<String, Value>;

/// Event forwarded ahead of an invalid event in `Warning` mode.
pub const VALIDATION_WARNING_EVENT: &str = "$schema_validation_warning";

/// The analytics SDK surface being wrapped.
pub trait AnalyticsClient {
    fn capture(&self, distinct_id: &str, event: &str, properties: &EventProperties);
    fn identify(&self, distinct_id: &str, properties: &EventProperties);
    fn alias(&self, previous_id: &str, distinct_id: &str);
    fn feature_enabled(&self, key: &str, distinct_id: &str) -> bool;
    fn get_feature_flag(&self, key: &str, distinct_id: &str) -> Option<Value>;
    fn flush(&self);
    fn shutdown(&self);
}

impl<C: AnalyticsClient + ?Sized> AnalyticsClient for &C {
    fn capture(&self, distinct_id: &str, event: &str, properties: &EventProperties) {
        (**self).capture(distinct_id, event, properties);
    }
    fn identify(&self, distinct_id: &str, properties: &EventProperties) {
        (**self).identify(distinct_id, properties);
    }
    fn alias(&self, previous_id: &str, distinct_id: &str) {
        (**self).alias(previous_id, distinct_id);
    }
    fn feature_enabled(&self, key: &str, distinct_id: &str) -> bool {
        (**self).feature_enabled(key, distinct_id)
    }
    fn get_feature_flag(&self, key: &str, distinct_id: &str) -> Option<Value> {
        (**self).get_feature_flag(key, distinct_id)
    }
    fn flush(&self) {
        (**self).flush();
    }
    fn shutdown(&self) {
        (**self).shutdown();
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("Validation failed for event '{event}': {}", errors.join("; "))]
    Validation { event: String, errors: Vec<String> },
}

/// Explicit wrapper handle. The validation mode is fixed at construction.
pub struct TypedClient<C> {
    client: C,
    table: SchemaTable,
    mode: ValidationMode,
    compiled: Option<HashMap<String, JSONSchema>>,
}

impl<C: AnalyticsClient> TypedClient<C> {
    pub fn new(client: C, table: SchemaTable, mode: ValidationMode) -> Self {
        Self {
            client,
            table,
            mode,
            compiled: None,
        }
    }

    /// Additionally validate properties against the full JSON Schema of
    /// each event, on top of the required and enum checks.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::SchemaValidation` if an embedded schema
    /// does not compile.
    pub fn with_deep_validation(mut self) -> Result<Self, CompilerError> {
        let mut compiled = HashMap::with_capacity(self.table.len());
        for (event, schema) in self.table.iter() {
            let validator = JSONSchema::compile(schema).map_err(|err| {
                ValidationError::SchemaValidation(format!("schema for '{event}': {err}"))
            })?;
            compiled.insert(event.to_string(), validator);
        }
        self.compiled = Some(compiled);
        Ok(self)
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn table(&self) -> &SchemaTable {
        &self.table
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Swap the wrapped client, returning the previous one.
    pub fn set_client(&mut self, client: C) -> C {
        std::mem::replace(&mut self.client, client)
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    /// Validation errors for `event`, or `None` when it passes, is unknown,
    /// or validation is disabled.
    pub fn validate(&self, event: &str, properties: &EventProperties) -> Option<Vec<String>> {
        if self.mode == ValidationMode::Disabled {
            return None;
        }
        let schema = self.table.get(event)?;
        let mut errors = Vec::new();

        let required = schema.get("required").and_then(Value::as_array);
        for field in required.into_iter().flatten().filter_map(Value::as_str) {
            if !properties.contains_key(field) {
                errors.push(format!("Missing required field: {field}"));
            }
        }

        if let Some(declared) = schema.get("properties").and_then(Value::as_object) {
            for (field, value) in properties {
                let allowed = declared
                    .get(field)
                    .and_then(|property| property.get("enum"))
                    .and_then(Value::as_array);
                if let Some(allowed) = allowed {
                    if !allowed.contains(value) {
                        errors.push(format!(
                            "Invalid enum value for {field}: {}",
                            display_value(value)
                        ));
                    }
                }
            }
        }

        if let Some(validator) = self.compiled.as_ref().and_then(|c| c.get(event)) {
            let instance = Value::Object(properties.clone());
            if let Err(failures) = validator.validate(&instance) {
                errors.extend(failures.map(|failure| {
                    let path = failure.instance_path.to_string();
                    if path.is_empty() {
                        format!("Schema violation: {failure}")
                    } else {
                        format!("Schema violation at {path}: {failure}")
                    }
                }));
            };
        }

        if errors.is_empty() {
            None
        } else {
            Some(errors)
        }
    }

    /// Validate and forward an event.
    ///
    /// Unknown events are forwarded without validation.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Validation` in `Strict` mode when validation
    /// fails; the event is not forwarded in that case.
    pub fn capture(
        &self,
        distinct_id: &str,
        event: &str,
        properties: &EventProperties,
    ) -> Result<(), CaptureError> {
        if let Some(errors) = self.validate(event, properties) {
            match self.mode {
                ValidationMode::Strict => {
                    return Err(CaptureError::Validation {
                        event: event.to_string(),
                        errors,
                    });
                }
                ValidationMode::Warning => {
                    tracing::warn!(event, ?errors, "event failed schema validation");
                    let mut diagnostic = EventProperties::new();
                    diagnostic.insert("event".to_string(), json!(event));
                    diagnostic.insert("errors".to_string(), json!(errors));
                    diagnostic.insert("properties".to_string(), Value::Object(properties.clone()));
                    self.client
                        .capture(distinct_id, VALIDATION_WARNING_EVENT, &diagnostic);
                }
                ValidationMode::Disabled => {}
            }
        }

        self.client.capture(distinct_id, event, properties);
        Ok(())
    }

    pub fn identify(&self, distinct_id: &str, properties: &EventProperties) {
        self.client.identify(distinct_id, properties);
    }

    pub fn alias(&self, previous_id: &str, distinct_id: &str) {
        self.client.alias(previous_id, distinct_id);
    }

    pub fn feature_enabled(&self, key: &str, distinct_id: &str) -> bool {
        self.client.feature_enabled(key, distinct_id)
    }

    pub fn get_feature_flag(&self, key: &str, distinct_id: &str) -> Option<Value> {
        self.client.get_feature_flag(key, distinct_id)
    }

    pub fn flush(&self) {
        self.client.flush();
    }

    pub fn shutdown(&self) {
        self.client.shutdown();
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
