/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use serde_json::Value;
use std::collections::HashMap;
use strsim::levenshtein;

use crate::fragment::pointer::escape_segment;
use crate::fragment::JsonPointer;
use crate::projector::event_name_to_type;
use crate::validator::common::schema_errors;
use crate::validator::error::ValidationError;

/// Validate one event schema document against the document schema plus the
/// rules JSON Schema cannot express.
pub fn validate_document(schema: &Value, file_path: &str, data: &Value) -> Vec<ValidationError> {
    let mut errors = schema_errors(schema, file_path, data);
    errors.extend(validate_event_names(file_path, data));
    errors.extend(validate_references(file_path, data));
    errors
}

/// Event names must not be blank.
fn validate_event_names(file_path: &str, data: &Value) -> Vec<ValidationError> {
    let Some(events) = data.get("events").and_then(Value::as_object) else {
        return Vec::new();
    };

    events
        .keys()
        .filter(|name| name.trim().is_empty())
        .map(|name| ValidationError {
            file: file_path.to_string(),
            line: None,
            column: None,
            message: "Event name must not be empty".to_string(),
            path: Some(format!("/events/{}", escape_segment(name))),
            suggestion: Some("Give the event a descriptive name such as 'page_viewed'".to_string()),
        })
        .collect()
}

/// Every `$ref` must use a supported form, and internal ones must resolve.
///
/// Relative file references are only checked for form here; whether their
/// target exists is a question for the resolver.
fn validate_references(file_path: &str, data: &Value) -> Vec<ValidationError> {
    let mut references = Vec::new();
    collect_references(data, String::new(), &mut references);

    let mut errors = Vec::new();
    for (path, reference) in references {
        if reference.starts_with("./") || reference.starts_with("../") {
            continue;
        }

        let pointer = if reference.starts_with('#') {
            JsonPointer::parse(reference)
        } else {
            None
        };

        match pointer {
            None => errors.push(ValidationError {
                file: file_path.to_string(),
                line: None,
                column: None,
                message: format!("Unsupported reference '{reference}'"),
                path: Some(path),
                suggestion: Some(
                    "Use '#/definitions/Name' for this file or './other.schema.json#/definitions/Name' for another file"
                        .to_string(),
                ),
            }),
            Some(pointer) if pointer.lookup(data).is_none() => errors.push(ValidationError {
                file: file_path.to_string(),
                line: None,
                column: None,
                message: format!("Unresolvable reference '{reference}'"),
                path: Some(path),
                suggestion: suggest_pointer(data, &pointer).map(|p| format!("Did you mean '{p}'?")),
            }),
            Some(_) => {}
        }
    }
    errors
}

/// Event names declared in more than one document.
///
/// Generation keeps the last declaration; this reports each overridden one.
pub fn validate_duplicate_events(documents: &[(String, Value)]) -> Vec<ValidationError> {
    let mut first_seen: HashMap<&str, &str> = HashMap::new();
    let mut errors = Vec::new();

    for (file_path, data) in documents {
        let Some(events) = data.get("events").and_then(Value::as_object) else {
            continue;
        };
        for name in events.keys() {
            match first_seen.get(name.as_str()) {
                Some(previous) => errors.push(ValidationError {
                    file: file_path.clone(),
                    line: None,
                    column: None,
                    message: format!("Duplicate event name: '{name}' (also declared in {previous})"),
                    path: Some(format!("/events/{}", escape_segment(name))),
                    suggestion: Some(
                        "Event names must be unique across schema files; the last declaration wins"
                            .to_string(),
                    ),
                }),
                None => {
                    first_seen.insert(name.as_str(), file_path.as_str());
                }
            }
        }
    }
    errors
}

/// Distinct event names that would generate the same type name.
pub fn validate_type_name_collisions(documents: &[(String, Value)]) -> Vec<ValidationError> {
    let mut first_seen: HashMap<String, (&str, &str)> = HashMap::new();
    let mut errors = Vec::new();

    for (file_path, data) in documents {
        let Some(events) = data.get("events").and_then(Value::as_object) else {
            continue;
        };
        for name in events.keys() {
            let type_name = event_name_to_type(name);
            match first_seen.get(&type_name) {
                Some((previous, _)) if *previous == name.as_str() => {}
                Some((previous, previous_file)) => errors.push(ValidationError {
                    file: file_path.clone(),
                    line: None,
                    column: None,
                    message: format!(
                        "Event '{name}' generates the type name '{type_name}', already used by '{previous}' in {previous_file}"
                    ),
                    path: Some(format!("/events/{}", escape_segment(name))),
                    suggestion: Some(
                        "Rename one of the events so their generated type names differ".to_string(),
                    ),
                }),
                None => {
                    first_seen.insert(type_name, (name.as_str(), file_path.as_str()));
                }
            }
        }
    }
    errors
}

fn collect_references<'a>(value: &'a Value, path: String, out: &mut Vec<(String, &'a str)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = format!("{path}/{}", escape_segment(key));
                match (key.as_str(), child) {
                    ("$ref", Value::String(reference)) => out.push((child_path, reference)),
                    _ => collect_references(child, child_path, out),
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_references(item, format!("{path}/{index}"), out);
            }
        }
        _ => {}
    }
}

/// Replace the first missing segment of `pointer` with the closest existing
/// key, if one is close enough.
fn suggest_pointer(data: &Value, pointer: &JsonPointer) -> Option<JsonPointer> {
    let segments = pointer.segments();
    let mut current = data;

    for (index, segment) in segments.iter().enumerate() {
        let map = current.as_object()?;
        match map.get(segment) {
            Some(next) => current = next,
            None => {
                let candidate = closest_key(segment, map.keys())?;
                let mut suggested = segments.to_vec();
                suggested[index] = candidate;
                return Some(JsonPointer::from_segments(suggested));
            }
        }
    }
    None
}

fn closest_key<'a>(target: &str, keys: impl Iterator<Item = &'a String>) -> Option<String> {
    keys.map(|key| (key, levenshtein(target, key)))
        .filter(|(key, distance)| *distance > 0 && *distance <= target.len().max(key.len()) / 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(key, _)| key.clone())
}
