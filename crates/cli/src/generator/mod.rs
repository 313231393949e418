//! Wrapper code generators
//!
//! Each target renders a complete artifact from a `GenerationPlan`, in memory.

pub mod json;
pub mod literal;
pub mod python;
pub mod typescript;


use crate::error::CliResult;
use crate::utils::language::Language;
use hogtyped_compiler::GenerationPlan;

/// Trait for wrapper generators
pub trait Generator {
    /// Render the full artifact for `plan`.
    fn render(&self, plan: &GenerationPlan) -> CliResult<String>;
}

/// Render `plan` for the specified language
pub fn render(language: Language, plan: &GenerationPlan) -> CliResult<String> {
    match language {
        Language::Python => python::PythonGenerator::new()?.render(plan),
        Language::TypeScript => typescript::TypeScriptGenerator::new()?.render(plan),
        Language::Json => json::JsonGenerator.render(plan),
    }
}
