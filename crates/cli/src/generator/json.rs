//! Schema table output
//!
//! The bare table, keyed by event name, as read back by
//! `SchemaTable::from_json_str` in Rust services.

use crate::error::{CliError, CliResult};
use crate::generator::Generator;
use hogtyped_compiler::GenerationPlan;
use serde_json::Value;

pub struct JsonGenerator;

impl Generator for JsonGenerator {
    fn render(&self, plan: &GenerationPlan) -> CliResult<String> {
        let mut content = serde_json::to_string_pretty(&Value::Object(plan.schema_table()))
            .map_err(|e| CliError::Message(format!("Failed to serialize schemas: {e}")))?;
        content.push('\n');
        Ok(content)
    }
}
