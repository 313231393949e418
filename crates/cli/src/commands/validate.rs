//! Validate command implementation

use crate::error::{CliError, CliResult};
use crate::ops::schemas::{discover_schema_files, read_document, FsSource, DEFAULT_SCHEMA_PATTERN};
use crate::utils::config;
use hogtyped_compiler::{load_events, Validator};
use serde_json::Value;
use std::path::PathBuf;

pub struct Options {
    pub schemas: Option<String>,
}

/// Priority: CLI flag > Config > Default
fn determine_pattern(options: &Options) -> CliResult<String> {
    if let Some(pattern) = &options.schemas {
        return Ok(pattern.clone());
    }
    Ok(config::read_config()?
        .schemas
        .unwrap_or_else(|| DEFAULT_SCHEMA_PATTERN.to_string()))
}

/// Parse every file, reporting each failure instead of stopping at the first.
fn read_documents(files: &[PathBuf]) -> (Vec<(String, Value)>, usize) {
    let mut documents = Vec::new();
    let mut failures = 0;

    for path in files {
        match read_document(path) {
            Ok(document) => documents.push((path.display().to_string(), document)),
            Err(e) => {
                eprintln!("✗ Failed to parse {}", path.display());
                eprintln!("  Error: {e}");
                failures += 1;
            }
        }
    }
    (documents, failures)
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok((valid_count, pattern)) => {
            if valid_count > 0 {
                println!(
                    "✓ Validation passed ({} file{})",
                    valid_count,
                    if valid_count > 1 { "s" } else { "" }
                );
                0
            } else {
                eprintln!("✗ No schema files to validate");
                eprintln!("  Pattern '{pattern}' matched no files");
                eprintln!("  Use --schemas <pattern> or run `hogtyped init` to create an example");
                1
            }
        }
        Err(e) => {
            eprintln!("✗ Validation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<(usize, String)> {
    let pattern = determine_pattern(options)?;
    let files = discover_schema_files(&pattern)?;
    if files.is_empty() {
        return Ok((0, pattern));
    }

    let (documents, parse_failures) = read_documents(&files);

    let validator = Validator::new();
    let result = validator.validate_documents(&documents);
    if !result.valid {
        eprintln!("{}", validator.format_errors(&result.errors));
    }

    let problem_count = parse_failures + result.errors.len();
    if problem_count > 0 {
        return Err(CliError::Message(format!(
            "{problem_count} problem{} found in schema files",
            if problem_count > 1 { "s" } else { "" }
        )));
    }

    // A full resolution pass catches cycles and missing targets in other files.
    let set = load_events(&files, &FsSource)?;
    if !set.missing_references.is_empty() {
        for missing in &set.missing_references {
            eprintln!("✗ {missing}");
        }
        return Err(CliError::Message(format!(
            "{} unresolved reference{}",
            set.missing_references.len(),
            if set.missing_references.len() > 1 { "s" } else { "" }
        )));
    }

    Ok((files.len(), pattern))
}
