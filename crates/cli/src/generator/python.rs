//! Python wrapper generator
//!
//! Emits a single module with `TypedDict` event types, the embedded schema
//! table and a validating wrapper around the `posthog` package.

use crate::error::CliResult;
use crate::generator::literal::{
    is_python_identifier, python_docstring, python_literal, python_string,
};
use crate::generator::Generator;
use hogtyped_compiler::{EventDecl, GenerationPlan, TypeExpr};
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "python.py";

pub struct PythonGenerator {
    tera: Tera,
}

#[derive(Debug, Serialize)]
struct FieldContext {
    name: String,
    key_literal: String,
    type_hint: String,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventContext {
    type_name: String,
    event_literal: String,
    /// Class syntax only works when every key is an identifier.
    functional: bool,
    total_false: bool,
    fields: Vec<FieldContext>,
    schema_literal: String,
}

impl PythonGenerator {
    pub fn new() -> CliResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, include_str!("templates/python.py.tera"))?;
        tera.autoescape_on(vec![]);
        Ok(Self { tera })
    }

    fn event_context(event: &EventDecl) -> EventContext {
        let fields: Vec<FieldContext> = event
            .fields
            .iter()
            .map(|field| FieldContext {
                name: field.name.clone(),
                key_literal: python_string(&field.name),
                type_hint: python_type(&field.type_expr),
                description: field.description.as_deref().map(python_docstring),
            })
            .collect();

        EventContext {
            type_name: event.type_name.clone(),
            event_literal: python_string(&event.event_name),
            functional: !fields.iter().all(|f| is_python_identifier(&f.name)),
            total_false: event.has_optional,
            fields,
            schema_literal: python_literal(&event.schema, 1),
        }
    }
}

impl Generator for PythonGenerator {
    fn render(&self, plan: &GenerationPlan) -> CliResult<String> {
        let events: Vec<EventContext> = plan.events.iter().map(Self::event_context).collect();

        let event_name_type = if plan.events.is_empty() {
            "str".to_string()
        } else {
            let names: Vec<String> = plan
                .events
                .iter()
                .map(|e| python_string(&e.event_name))
                .collect();
            format!("Literal[{}]", names.join(", "))
        };

        let mut context = Context::new();
        context.insert("generated_at", &plan.generated_at);
        context.insert("generator_version", &plan.generator_version);
        context.insert("class_name", &plan.class_name);
        context.insert("mode_constant", plan.validation_mode.constant_name());
        context.insert("event_name_type", &event_name_type);
        context.insert("events", &events);

        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

/// Python type hint for a projected type.
pub fn python_type(expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Any => "Any".to_string(),
        TypeExpr::String => "str".to_string(),
        TypeExpr::Float => "float".to_string(),
        TypeExpr::Integer => "int".to_string(),
        TypeExpr::Boolean => "bool".to_string(),
        TypeExpr::Literal(values) => {
            let members: Vec<String> = values.iter().map(|v| python_literal(v, 0)).collect();
            format!("Literal[{}]", members.join(", "))
        }
        TypeExpr::List(inner) => format!("List[{}]", python_type(inner)),
        TypeExpr::Map => "Dict[str, Any]".to_string(),
        TypeExpr::Optional(inner) => format!("Optional[{}]", python_type(inner)),
    }
}
