//! Generate command implementation

use crate::error::CliResult;
use crate::ops::generate::{generate_wrapper, GenerateOptions, GenerateSettings, GenerateSummary};
use crate::utils::config;

pub type Options = GenerateOptions;

fn print_summary(settings: &GenerateSettings, summary: &GenerateSummary) {
    println!(
        "✓ Generated {} wrapper at {}",
        settings.class_name,
        summary.output.display()
    );
    println!(
        "  {} event{} from {} schema file{} ({})",
        summary.event_count,
        if summary.event_count == 1 { "" } else { "s" },
        summary.file_count,
        if summary.file_count == 1 { "" } else { "s" },
        settings.language
    );
    println!("  Validation mode: {}", settings.mode);

    if summary.duplicate_count > 0 {
        println!(
            "  Warning: {} duplicate event name(s); the last declaration was kept",
            summary.duplicate_count
        );
    }
    if !summary.missing_references.is_empty() {
        println!(
            "  Warning: {} unresolved reference(s); affected properties are untyped",
            summary.missing_references.len()
        );
        for missing in &summary.missing_references {
            println!("    - {missing}");
        }
    }
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok((settings, summary)) => {
            print_summary(&settings, &summary);
            0
        }
        Err(e) => {
            eprintln!("✗ Generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<(GenerateSettings, GenerateSummary)> {
    let config = config::read_config()?;
    let settings = GenerateSettings::resolve(options, &config)?;
    let summary = generate_wrapper(&settings)?;
    Ok((settings, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::DirGuard;
    use serial_test::serial;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_generate_command_success() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path()).unwrap();

        fs::create_dir_all("schemas").unwrap();
        fs::write(
            "schemas/events.schema.json",
            r#"{"events": {"page_viewed": {"type": "object", "properties": {"url": {"type": "string"}}}}}"#,
        )
        .unwrap();

        assert_eq!(run(&Options::default()), 0);
        assert!(Path::new("posthog_generated.py").exists());
    }

    #[test]
    #[serial]
    fn test_generate_command_uses_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path()).unwrap();

        fs::create_dir_all("events").unwrap();
        fs::write("events/a.json", r#"{"events": {"a": {"type": "object"}}}"#).unwrap();
        fs::write(
            config::CONFIG_FILE,
            "schemas: events/*.json\noutput: gen/analytics.ts\nclassName: Analytics\n",
        )
        .unwrap();

        assert_eq!(run(&Options::default()), 0);
        let content = fs::read_to_string("gen/analytics.ts").unwrap();
        assert!(content.contains("export class Analytics {"));
    }

    #[test]
    #[serial]
    fn test_generate_command_invalid_class_name() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path()).unwrap();

        let options = Options {
            class_name: Some("not valid".to_string()),
            ..Options::default()
        };
        assert_eq!(run(&options), 1);
        assert!(!Path::new("posthog_generated.py").exists());
    }
}
