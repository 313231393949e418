/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Generation plan: everything a renderer needs, with no target syntax in it.

use crate::client::ValidationMode;
use crate::error::CompilerError;
use crate::loader::SchemaSet;
use crate::projector::{project_fields, FieldDecl};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const DEFAULT_CLASS_NAME: &str = "PostHog";

/// Options that are not derived from the schemas themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOptions {
    pub class_name: String,
    pub validation_mode: ValidationMode,
    /// Timestamp written into the artifact header.
    pub generated_at: String,
    pub generator_version: String,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            validation_mode: ValidationMode::default(),
            generated_at: String::new(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One event as the renderers see it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDecl {
    pub event_name: String,
    pub type_name: String,
    pub fields: Vec<FieldDecl>,
    /// Resolved schema, embedded verbatim into the artifact.
    pub schema: Value,
    pub has_optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    pub class_name: String,
    pub validation_mode: ValidationMode,
    pub generated_at: String,
    pub generator_version: String,
    /// Descending event-name order, as produced by the loader.
    pub events: Vec<EventDecl>,
}

impl GenerationPlan {
    pub fn event_names(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.event_name.as_str()).collect()
    }

    /// Event name to resolved schema, in plan order.
    pub fn schema_table(&self) -> Map<String, Value> {
        self.events
            .iter()
            .map(|e| (e.event_name.clone(), e.schema.clone()))
            .collect()
    }
}

/// Build the plan for `set`.
///
/// Fails when two distinct event names project to the same type name, since
/// the artifact would declare that type twice.
pub fn build_plan(set: &SchemaSet, options: PlanOptions) -> Result<GenerationPlan, CompilerError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for event in &set.events {
        if let Some(first) = seen.insert(&event.type_name, &event.event_name) {
            return Err(CompilerError::TypeNameCollision {
                type_name: event.type_name.clone(),
                first: first.to_string(),
                second: event.event_name.clone(),
            });
        }
    }

    let events = set
        .events
        .iter()
        .map(|event| {
            let fields = project_fields(event);
            EventDecl {
                event_name: event.event_name.clone(),
                type_name: event.type_name.clone(),
                has_optional: fields.iter().any(|f| !f.required),
                fields,
                schema: event.schema.to_value(),
            }
        })
        .collect();

    Ok(GenerationPlan {
        class_name: options.class_name,
        validation_mode: options.validation_mode,
        generated_at: options.generated_at,
        generator_version: options.generator_version,
        events,
    })
}
