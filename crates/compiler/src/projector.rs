/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Type projection.
//!
//! Maps resolved schema fragments onto a small, language-neutral set of
//! static types. Renderers turn a `TypeExpr` into target syntax.
//! Objects are never expanded into nested named types.

use crate::fragment::{PrimitiveKind, SchemaFragment};
use crate::loader::ResolvedEvent;
use serde_json::Value;

/// A target-neutral static type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Untyped escape hatch.
    Any,
    String,
    Float,
    Integer,
    Boolean,
    /// Closed union of literal values, in declaration order.
    Literal(Vec<Value>),
    /// Homogeneous sequence.
    List(Box<TypeExpr>),
    /// Open string-keyed map to `Any`.
    Map,
    Optional(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

/// One property of an event type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    /// Already wrapped in `Optional` when the field is not required.
    pub type_expr: TypeExpr,
    pub required: bool,
    pub description: Option<String>,
}

/// Project a resolved fragment onto a static type.
pub fn project_type(fragment: &SchemaFragment) -> TypeExpr {
    if !fragment.is_truthy() {
        return TypeExpr::Any;
    }

    match fragment {
        SchemaFragment::Primitive(schema) => match schema.kind {
            PrimitiveKind::String => match &schema.enum_values {
                Some(values) if !values.is_empty() => TypeExpr::Literal(values.clone()),
                _ => TypeExpr::String,
            },
            PrimitiveKind::Number => TypeExpr::Float,
            PrimitiveKind::Integer => TypeExpr::Integer,
            PrimitiveKind::Boolean => TypeExpr::Boolean,
        },
        SchemaFragment::Array(schema) => {
            let items = schema
                .items
                .as_deref()
                .map_or(TypeExpr::Any, project_type);
            TypeExpr::List(Box::new(items))
        }
        // additionalProperties, properties or neither: all open maps.
        SchemaFragment::Object(_) => TypeExpr::Map,
        SchemaFragment::Any(_) | SchemaFragment::Reference(_) | SchemaFragment::Composition(_) => {
            TypeExpr::Any
        }
    }
}

/// Fields of an event's top-level type, in property order.
pub fn project_fields(event: &ResolvedEvent) -> Vec<FieldDecl> {
    event
        .properties
        .iter()
        .map(|(name, fragment)| {
            let required = event.required.iter().any(|r| r == name);
            let type_expr = project_type(fragment);
            FieldDecl {
                name: name.clone(),
                type_expr: if required {
                    type_expr
                } else {
                    TypeExpr::Optional(Box::new(type_expr))
                },
                required,
                description: fragment
                    .description()
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
            }
        })
        .collect()
}

/// Derive the type identifier for an event name.
///
/// `user_signed_up` becomes `UserSignedUpProperties`. Names are split on
/// `-`, `_`, `.` and whitespace; other non-alphanumeric characters are
/// dropped. A leading digit gets an `Event` prefix so the result stays a
/// valid identifier.
pub fn event_name_to_type(event_name: &str) -> String {
    let mut type_name: String = event_name
        .split(|c: char| c == '-' || c == '_' || c == '.' || c.is_whitespace())
        .map(capitalize)
        .collect();

    if type_name.starts_with(|c: char| c.is_ascii_digit()) {
        type_name.insert_str(0, "Event");
    }
    type_name.push_str("Properties");
    type_name
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars().filter(|c| c.is_alphanumeric());
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
