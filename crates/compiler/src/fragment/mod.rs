/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Schema fragment model.
//!
//! A `SchemaFragment` is one node of a JSON Schema type tree. Raw JSON is
//! classified into a closed set of variants so that resolution and type
//! projection can match exhaustively. Keywords the model does not interpret
//! are kept as annotations and survive a round trip through `to_value`.

pub mod pointer;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub use pointer::JsonPointer;

/// Uninterpreted keywords (`description`, `format`, `minimum`, ...).
pub type Annotations = Map<String, Value>;

/// Ordered `properties` of an object schema.
pub type Properties = IndexMap<String, SchemaFragment>;

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaFragment {
    /// Raw JSON with no recognised `type`: absent/falsy values, untyped
    /// objects, `type` arrays, booleans used as schemas.
    Any(Value),
    Primitive(PrimitiveSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    /// `$ref` pointer. Never present after resolution.
    Reference(String),
    /// `allOf` members. Never present after resolution.
    Composition(Vec<SchemaFragment>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Integer,
    Boolean,
}

impl PrimitiveKind {
    pub fn from_type(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSchema {
    pub kind: PrimitiveKind,
    pub enum_values: Option<Vec<Value>>,
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub items: Option<Box<SchemaFragment>>,
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    pub properties: Option<Properties>,
    pub required: Option<Vec<String>>,
    pub additional_properties: Option<Box<SchemaFragment>>,
    pub annotations: Annotations,
}

impl SchemaFragment {
    /// The absent schema a missing reference resolves to.
    pub fn absent() -> Self {
        Self::Any(Value::Null)
    }

    /// Classify raw JSON. `$ref` wins over `allOf`, which wins over `type`.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::Any(value.clone());
        };

        if let Some(Value::String(reference)) = map.get("$ref") {
            return Self::Reference(reference.clone());
        }
        if let Some(Value::Array(members)) = map.get("allOf") {
            return Self::Composition(members.iter().map(Self::from_value).collect());
        }

        match map.get("type").and_then(Value::as_str) {
            Some("object") => Self::Object(ObjectSchema::from_map(map)),
            Some("array") => Self::Array(ArraySchema::from_map(map)),
            Some(name) => match PrimitiveKind::from_type(name) {
                Some(kind) => Self::Primitive(PrimitiveSchema::from_map(kind, map)),
                None => Self::Any(value.clone()),
            },
            None => Self::Any(value.clone()),
        }
    }

    /// Back to raw JSON. Keys are emitted as `type`, structural keywords,
    /// then annotations in their original order.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Any(value) => value.clone(),
            Self::Reference(reference) => {
                let mut map = Map::new();
                map.insert("$ref".to_string(), Value::String(reference.clone()));
                Value::Object(map)
            }
            Self::Composition(members) => {
                let mut map = Map::new();
                map.insert(
                    "allOf".to_string(),
                    Value::Array(members.iter().map(Self::to_value).collect()),
                );
                Value::Object(map)
            }
            Self::Primitive(schema) => {
                let mut map = typed_map(schema.kind.as_str());
                if let Some(values) = &schema.enum_values {
                    map.insert("enum".to_string(), Value::Array(values.clone()));
                }
                extend_annotations(&mut map, &schema.annotations);
                Value::Object(map)
            }
            Self::Array(schema) => {
                let mut map = typed_map("array");
                if let Some(items) = &schema.items {
                    map.insert("items".to_string(), items.to_value());
                }
                extend_annotations(&mut map, &schema.annotations);
                Value::Object(map)
            }
            Self::Object(schema) => {
                let mut map = typed_map("object");
                if let Some(properties) = &schema.properties {
                    let props = properties
                        .iter()
                        .map(|(name, fragment)| (name.clone(), fragment.to_value()))
                        .collect();
                    map.insert("properties".to_string(), Value::Object(props));
                }
                if let Some(required) = &schema.required {
                    map.insert(
                        "required".to_string(),
                        Value::Array(required.iter().cloned().map(Value::String).collect()),
                    );
                }
                if let Some(additional) = &schema.additional_properties {
                    map.insert("additionalProperties".to_string(), additional.to_value());
                }
                extend_annotations(&mut map, &schema.annotations);
                Value::Object(map)
            }
        }
    }

    /// JSON truthiness: null, false, 0, "", [] and {} are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Any(value) => is_truthy_value(value),
            _ => true,
        }
    }

    /// Whether any `$ref` or `allOf` is still reachable from this node.
    pub fn contains_unresolved(&self) -> bool {
        match self {
            Self::Reference(_) | Self::Composition(_) => true,
            Self::Any(value) => value_contains_unresolved(value),
            Self::Primitive(schema) => {
                schema
                    .enum_values
                    .iter()
                    .flatten()
                    .any(value_contains_unresolved)
                    || annotations_contain_unresolved(&schema.annotations)
            }
            Self::Array(schema) => {
                schema
                    .items
                    .as_ref()
                    .is_some_and(|items| items.contains_unresolved())
                    || annotations_contain_unresolved(&schema.annotations)
            }
            Self::Object(schema) => {
                schema
                    .properties
                    .iter()
                    .flat_map(|props| props.values())
                    .any(SchemaFragment::contains_unresolved)
                    || schema
                        .additional_properties
                        .as_ref()
                        .is_some_and(|additional| additional.contains_unresolved())
                    || annotations_contain_unresolved(&schema.annotations)
            }
        }
    }

    /// `properties` of this node, whether typed or a raw untyped object.
    pub fn properties(&self) -> Properties {
        match self {
            Self::Object(schema) => schema.properties.clone().unwrap_or_default(),
            Self::Any(Value::Object(map)) => map
                .get("properties")
                .and_then(Value::as_object)
                .map(|props| {
                    props
                        .iter()
                        .map(|(name, value)| (name.clone(), Self::from_value(value)))
                        .collect()
                })
                .unwrap_or_default(),
            _ => Properties::new(),
        }
    }

    /// `required` names of this node, whether typed or a raw untyped object.
    pub fn required(&self) -> Vec<String> {
        match self {
            Self::Object(schema) => schema.required.clone().unwrap_or_default(),
            Self::Any(Value::Object(map)) => map
                .get("required")
                .and_then(string_array)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// `additionalProperties` if the node declares it (even when `false`).
    pub fn additional_properties(&self) -> Option<SchemaFragment> {
        match self {
            Self::Object(schema) => schema.additional_properties.as_deref().cloned(),
            Self::Any(Value::Object(map)) => map.get("additionalProperties").map(Self::from_value),
            _ => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.annotations()
            .and_then(|annotations| annotations.get("description"))
            .and_then(Value::as_str)
    }

    fn annotations(&self) -> Option<&Annotations> {
        match self {
            Self::Primitive(schema) => Some(&schema.annotations),
            Self::Array(schema) => Some(&schema.annotations),
            Self::Object(schema) => Some(&schema.annotations),
            Self::Any(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

impl PrimitiveSchema {
    fn from_map(kind: PrimitiveKind, map: &Map<String, Value>) -> Self {
        let mut enum_values = None;
        let mut annotations = Annotations::new();
        for (key, value) in map {
            match (key.as_str(), value) {
                ("type", _) => {}
                ("enum", Value::Array(values)) => enum_values = Some(values.clone()),
                _ => {
                    annotations.insert(key.clone(), value.clone());
                }
            }
        }
        Self {
            kind,
            enum_values,
            annotations,
        }
    }
}

impl ArraySchema {
    fn from_map(map: &Map<String, Value>) -> Self {
        let mut items = None;
        let mut annotations = Annotations::new();
        for (key, value) in map {
            match key.as_str() {
                "type" => {}
                "items" => items = Some(Box::new(SchemaFragment::from_value(value))),
                _ => {
                    annotations.insert(key.clone(), value.clone());
                }
            }
        }
        Self { items, annotations }
    }
}

impl ObjectSchema {
    fn from_map(map: &Map<String, Value>) -> Self {
        let mut schema = Self::default();
        for (key, value) in map {
            match (key.as_str(), value) {
                ("type", _) => {}
                ("properties", Value::Object(props)) => {
                    schema.properties = Some(
                        props
                            .iter()
                            .map(|(name, value)| (name.clone(), SchemaFragment::from_value(value)))
                            .collect(),
                    );
                }
                ("required", value) => match string_array(value) {
                    Some(names) => schema.required = Some(names),
                    None => {
                        schema.annotations.insert(key.clone(), value.clone());
                    }
                },
                ("additionalProperties", value) => {
                    schema.additional_properties =
                        Some(Box::new(SchemaFragment::from_value(value)));
                }
                _ => {
                    schema.annotations.insert(key.clone(), value.clone());
                }
            }
        }
        schema
    }
}

impl From<&Value> for SchemaFragment {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

impl Serialize for SchemaFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaFragment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}

/// JSON truthiness of a raw value.
pub fn is_truthy_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Whether raw JSON still holds a `$ref` string or an `allOf` array anywhere.
pub fn value_contains_unresolved(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            matches!(map.get("$ref"), Some(Value::String(_)))
                || matches!(map.get("allOf"), Some(Value::Array(_)))
                || map.values().any(value_contains_unresolved)
        }
        Value::Array(items) => items.iter().any(value_contains_unresolved),
        _ => false,
    }
}

fn annotations_contain_unresolved(annotations: &Annotations) -> bool {
    annotations.values().any(value_contains_unresolved)
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn typed_map(type_name: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".to_string(), Value::String(type_name.to_string()));
    map
}

fn extend_annotations(map: &mut Map<String, Value>, annotations: &Annotations) {
    for (key, value) in annotations {
        map.insert(key.clone(), value.clone());
    }
}
