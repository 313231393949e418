//! Init command implementation

use crate::error::{CliError, CliResult};
use serde_json::json;
use std::fs;
use std::path::Path;

pub const SCHEMA_DIR: &str = "schemas";
pub const EXAMPLE_SCHEMA_PATH: &str = "schemas/events.schema.json";

pub struct Options {
    pub force: bool,
}

#[derive(Debug, PartialEq, Eq)]
struct InitOutcome {
    created_directory: bool,
    wrote_example: bool,
}

fn example_schema() -> CliResult<String> {
    let schema = json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "definitions": {
            "PageView": {
                "type": "object",
                "properties": {
                    "url": {"type": "string", "format": "uri"},
                    "title": {"type": "string"},
                    "referrer": {"type": "string", "format": "uri"}
                },
                "required": ["url"]
            }
        },
        "events": {
            "page_viewed": {"$ref": "#/definitions/PageView"}
        }
    });
    let mut content = serde_json::to_string_pretty(&schema)
        .map_err(|e| CliError::Message(format!("Failed to serialize example schema: {e}")))?;
    content.push('\n');
    Ok(content)
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(outcome) => {
            println!("✓ Project initialized");
            if outcome.created_directory {
                println!("  Created {SCHEMA_DIR}/");
            }
            if outcome.wrote_example {
                println!("  Created {EXAMPLE_SCHEMA_PATH}");
            } else {
                println!("  Kept existing {EXAMPLE_SCHEMA_PATH} (use --force to overwrite)");
            }
            println!();
            println!("Next steps:");
            println!("  1. Edit your schemas in {EXAMPLE_SCHEMA_PATH}");
            println!("  2. Validate them: hogtyped validate");
            println!("  3. Generate the wrapper: hogtyped generate");
            0
        }
        Err(e) => {
            eprintln!("✗ Initialization failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<InitOutcome> {
    let created_directory = !Path::new(SCHEMA_DIR).exists();
    if created_directory {
        fs::create_dir_all(SCHEMA_DIR)?;
    }

    let wrote_example = options.force || !Path::new(EXAMPLE_SCHEMA_PATH).exists();
    if wrote_example {
        fs::write(EXAMPLE_SCHEMA_PATH, example_schema()?)?;
    }

    Ok(InitOutcome {
        created_directory,
        wrote_example,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::DirGuard;
    use hogtyped_compiler::{load_events, MemorySource};
    use serial_test::serial;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_example_schema_resolves() {
        let source = MemorySource::new().with_file(EXAMPLE_SCHEMA_PATH, example_schema().unwrap());
        let set = load_events(&[PathBuf::from(EXAMPLE_SCHEMA_PATH)], &source).unwrap();

        let event = set.get("page_viewed").unwrap();
        assert_eq!(event.type_name, "PageViewedProperties");
        assert_eq!(event.required, vec!["url"]);
    }

    #[test]
    #[serial]
    fn test_init_command_success() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path();
        let _guard = DirGuard::new(temp_path).unwrap();

        let exit_code = run(&Options { force: false });
        assert_eq!(exit_code, 0);

        let content = fs::read_to_string(temp_path.join(EXAMPLE_SCHEMA_PATH)).unwrap();
        assert!(content.contains("page_viewed"));
    }

    #[test]
    #[serial]
    fn test_init_keeps_existing_schema() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path()).unwrap();

        fs::create_dir_all(SCHEMA_DIR).unwrap();
        fs::write(EXAMPLE_SCHEMA_PATH, "{}").unwrap();

        let outcome = run_inner(&Options { force: false }).unwrap();
        assert_eq!(
            outcome,
            InitOutcome {
                created_directory: false,
                wrote_example: false
            }
        );
        assert_eq!(fs::read_to_string(EXAMPLE_SCHEMA_PATH).unwrap(), "{}");
    }

    #[test]
    #[serial]
    fn test_init_command_with_force() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path()).unwrap();

        fs::create_dir_all(SCHEMA_DIR).unwrap();
        fs::write(EXAMPLE_SCHEMA_PATH, "{}").unwrap();

        assert_eq!(run(&Options { force: true }), 0);
        assert!(fs::read_to_string(EXAMPLE_SCHEMA_PATH)
            .unwrap()
            .contains("PageView"));
    }
}
