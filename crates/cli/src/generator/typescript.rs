//! TypeScript wrapper generator
//!
//! Emits interfaces per event, an `EventName` union and a wrapper around
//! `posthog-node` whose `capture` is overloaded on the event name.

use crate::error::{CliError, CliResult};
use crate::generator::literal::is_typescript_identifier;
use crate::generator::Generator;
use hogtyped_compiler::{EventDecl, GenerationPlan, TypeExpr};
use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "typescript.ts";

/// TypeScript wrapper generator
pub struct TypeScriptGenerator {
    tera: Tera,
}

#[derive(Debug, Serialize)]
struct FieldContext {
    key: String,
    optional: bool,
    type_hint: String,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventContext {
    type_name: String,
    event_literal: String,
    fields: Vec<FieldContext>,
}

impl TypeScriptGenerator {
    pub fn new() -> CliResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, include_str!("templates/typescript.ts.tera"))?;
        // Auto-escape is disabled for TypeScript code generation
        tera.autoescape_on(vec![]);
        Ok(Self { tera })
    }

    fn event_context(event: &EventDecl) -> EventContext {
        let fields = event
            .fields
            .iter()
            .map(|field| {
                // Optional-ness is expressed with `?`, not in the type.
                let type_expr = match &field.type_expr {
                    TypeExpr::Optional(inner) => inner.as_ref(),
                    other => other,
                };
                FieldContext {
                    key: property_key(&field.name),
                    optional: !field.required,
                    type_hint: typescript_type(type_expr),
                    description: field
                        .description
                        .as_deref()
                        .map(|d| d.replace("*/", "*\\/")),
                }
            })
            .collect();

        EventContext {
            type_name: event.type_name.clone(),
            event_literal: string_literal(&event.event_name),
            fields,
        }
    }
}

impl Generator for TypeScriptGenerator {
    fn render(&self, plan: &GenerationPlan) -> CliResult<String> {
        let events: Vec<EventContext> = plan.events.iter().map(Self::event_context).collect();

        let event_name_type = if events.is_empty() {
            "never".to_string()
        } else {
            events
                .iter()
                .map(|e| e.event_literal.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let schema_table = serde_json::to_string_pretty(&Value::Object(plan.schema_table()))
            .map_err(|e| CliError::Message(format!("Failed to serialize schemas: {e}")))?;

        let mut context = Context::new();
        context.insert("generated_at", &plan.generated_at);
        context.insert("generator_version", &plan.generator_version);
        context.insert("class_name", &plan.class_name);
        context.insert("mode_constant", plan.validation_mode.constant_name());
        context.insert("event_name_type", &event_name_type);
        context.insert("schema_table", &schema_table);
        context.insert("events", &events);

        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

/// TypeScript type for a projected type.
pub fn typescript_type(expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Any => "any".to_string(),
        TypeExpr::String => "string".to_string(),
        TypeExpr::Float | TypeExpr::Integer => "number".to_string(),
        TypeExpr::Boolean => "boolean".to_string(),
        TypeExpr::Literal(values) => values
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(" | "),
        TypeExpr::List(inner) => format!("Array<{}>", typescript_type(inner)),
        TypeExpr::Map => "Record<string, any>".to_string(),
        TypeExpr::Optional(inner) => format!("{} | null", typescript_type(inner)),
    }
}

fn string_literal(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

fn property_key(name: &str) -> String {
    if is_typescript_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}
