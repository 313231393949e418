//! Reusable wrapper generation operations

use crate::error::{CliError, CliResult};
use crate::generator;
use crate::generator::literal::{PYTHON_KEYWORDS, TYPESCRIPT_RESERVED_WORDS};
use crate::ops::schemas::{discover_schema_files, FsSource, DEFAULT_SCHEMA_PATTERN};
use crate::utils::config::ConfigFile;
use crate::utils::language::{determine_language, Language};
use hogtyped_compiler::ir::DEFAULT_CLASS_NAME;
use hogtyped_compiler::{
    build_plan, load_events, GenerationPlan, MissingReference, PlanOptions, ValidationMode,
};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for generating a wrapper, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Schema glob (if None, config file or `./schemas/*.schema.json`)
    pub schemas: Option<String>,
    /// Output file (if None, config file or `./posthog_generated.<ext>`)
    pub output: Option<String>,
    pub class_name: Option<String>,
    /// `strict`, `warning` or `disabled`
    pub mode: Option<String>,
    /// Target language (if None, config file, output extension, then Python)
    pub lang: Option<String>,
}

/// Fully resolved generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSettings {
    pub pattern: String,
    pub output: PathBuf,
    pub class_name: String,
    pub mode: ValidationMode,
    pub language: Language,
}

impl GenerateSettings {
    /// Merge flags with the config file.
    /// Priority: CLI flag > Config > Default
    pub fn resolve(options: &GenerateOptions, config: &ConfigFile) -> CliResult<Self> {
        let pattern = options
            .schemas
            .clone()
            .or_else(|| config.schemas.clone())
            .unwrap_or_else(|| DEFAULT_SCHEMA_PATTERN.to_string());

        let output = options.output.clone().or_else(|| config.output.clone());
        let language = determine_language(
            options.lang.as_deref(),
            config.language.as_deref(),
            output.as_deref().map(Path::new),
        )?;
        let output = PathBuf::from(output.unwrap_or_else(|| language.default_output()));

        let class_name = options
            .class_name
            .clone()
            .or_else(|| config.class_name.clone())
            .unwrap_or_else(|| DEFAULT_CLASS_NAME.to_string());
        validate_class_name(&class_name)?;

        let mode = match options.mode.as_deref().or(config.mode.as_deref()) {
            Some(mode) => mode.parse::<ValidationMode>().map_err(CliError::Message)?,
            None => ValidationMode::default(),
        };

        Ok(Self {
            pattern,
            output,
            class_name,
            mode,
            language,
        })
    }
}

/// What a generation run produced.
#[derive(Debug)]
pub struct GenerateSummary {
    pub output: PathBuf,
    pub event_count: usize,
    pub file_count: usize,
    pub missing_references: Vec<MissingReference>,
    pub duplicate_count: usize,
}

/// Top-level names the generated artifacts already define or import.
const ARTIFACT_NAMES: &[&str] = &[
    "Any", "Dict", "Enum", "EventName", "EventPropertiesMap", "List", "Literal", "Optional",
    "PostHogClient", "SCHEMAS", "TypedDict", "Union", "ValidationMode", "hogtyped", "json",
    "jsonschema", "overload", "posthog", "warnings",
];

/// The class name must be usable as an identifier in every target language.
pub fn validate_class_name(class_name: &str) -> CliResult<()> {
    let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
        .map_err(|e| CliError::Message(format!("Invalid identifier pattern: {e}")))?;

    if !identifier.is_match(class_name) {
        return Err(CliError::Message(format!(
            "Invalid class name '{class_name}'. Use letters, digits and underscores, not starting with a digit"
        )));
    }

    if PYTHON_KEYWORDS.contains(&class_name) || TYPESCRIPT_RESERVED_WORDS.contains(&class_name) {
        return Err(CliError::Message(format!(
            "Invalid class name '{class_name}'. It is a reserved word"
        )));
    }

    if ARTIFACT_NAMES.contains(&class_name) {
        return Err(CliError::Message(format!(
            "Invalid class name '{class_name}'. It clashes with a name the generated code defines"
        )));
    }

    Ok(())
}

/// The class name must not shadow one of the generated event types.
fn check_class_name_against_events(class_name: &str, plan: &GenerationPlan) -> CliResult<()> {
    match plan.events.iter().find(|event| event.type_name == class_name) {
        Some(event) => Err(CliError::Message(format!(
            "Invalid class name '{class_name}'. It clashes with the type generated for event '{}'",
            event.event_name
        ))),
        None => Ok(()),
    }
}

/// Timestamp written into the artifact header.
fn generation_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Generate the wrapper described by `settings`.
///
/// This function:
/// 1. Expands the schema glob
/// 2. Loads and resolves every event
/// 3. Renders the whole artifact in memory
/// 4. Replaces the output file atomically
pub fn generate_wrapper(settings: &GenerateSettings) -> CliResult<GenerateSummary> {
    let files = discover_schema_files(&settings.pattern)?;
    if files.is_empty() {
        tracing::warn!(pattern = %settings.pattern, "no schema files matched");
    }

    let set = load_events(&files, &FsSource)?;

    let plan = build_plan(
        &set,
        PlanOptions {
            class_name: settings.class_name.clone(),
            validation_mode: settings.mode,
            generated_at: generation_timestamp(),
            generator_version: env!("HOGTYPED_VERSION").to_string(),
        },
    )?;
    check_class_name_against_events(&settings.class_name, &plan)?;

    let content = generator::render(settings.language, &plan)?;
    write_atomic(&settings.output, &content)?;

    tracing::info!(
        output = %settings.output.display(),
        events = plan.events.len(),
        language = %settings.language,
        "wrapper generated"
    );

    Ok(GenerateSummary {
        output: settings.output.clone(),
        event_count: plan.events.len(),
        file_count: files.len(),
        missing_references: set.missing_references,
        duplicate_count: set.duplicates.len(),
    })
}

/// Write `content` next to `path` first, then rename it into place.
pub fn write_atomic(path: &Path, content: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| CliError::Message(format!("Invalid output path: {}", path.display())))?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".hogtyped.tmp");
    let temp_path = path.with_file_name(temp_name);

    if let Err(e) = fs::write(&temp_path, content).and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_for(dir: &Path, language: Language, output: &str) -> GenerateSettings {
        GenerateSettings {
            pattern: format!("{}/schemas/*.schema.json", dir.display()),
            output: dir.join(output),
            class_name: "PostHog".to_string(),
            mode: ValidationMode::Warning,
            language,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let settings =
            GenerateSettings::resolve(&GenerateOptions::default(), &ConfigFile::default()).unwrap();
        assert_eq!(settings.pattern, "./schemas/*.schema.json");
        assert_eq!(settings.output, PathBuf::from("./posthog_generated.py"));
        assert_eq!(settings.class_name, "PostHog");
        assert_eq!(settings.mode, ValidationMode::Warning);
        assert_eq!(settings.language, Language::Python);
    }

    #[test]
    fn test_resolve_flag_beats_config() {
        let options = GenerateOptions {
            mode: Some("strict".to_string()),
            class_name: Some("Analytics".to_string()),
            ..GenerateOptions::default()
        };
        let config = ConfigFile {
            mode: Some("disabled".to_string()),
            class_name: Some("Tracker".to_string()),
            schemas: Some("events/*.json".to_string()),
            ..ConfigFile::default()
        };

        let settings = GenerateSettings::resolve(&options, &config).unwrap();
        assert_eq!(settings.mode, ValidationMode::Strict);
        assert_eq!(settings.class_name, "Analytics");
        assert_eq!(settings.pattern, "events/*.json");
    }

    #[test]
    fn test_resolve_language_sets_default_output() {
        let options = GenerateOptions {
            lang: Some("typescript".to_string()),
            ..GenerateOptions::default()
        };
        let settings = GenerateSettings::resolve(&options, &ConfigFile::default()).unwrap();
        assert_eq!(settings.output, PathBuf::from("./posthog_generated.ts"));
    }

    #[test]
    fn test_resolve_output_extension_sets_language() {
        let options = GenerateOptions {
            output: Some("gen/schemas.json".to_string()),
            ..GenerateOptions::default()
        };
        let settings = GenerateSettings::resolve(&options, &ConfigFile::default()).unwrap();
        assert_eq!(settings.language, Language::Json);
    }

    #[test]
    fn test_resolve_rejects_invalid_mode() {
        let options = GenerateOptions {
            mode: Some("loud".to_string()),
            ..GenerateOptions::default()
        };
        let err = GenerateSettings::resolve(&options, &ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid validation mode"));
    }

    #[test]
    fn test_validate_class_name() {
        assert!(validate_class_name("PostHog").is_ok());
        assert!(validate_class_name("_Analytics2").is_ok());
        assert!(validate_class_name("2Fast").is_err());
        assert!(validate_class_name("My-Class").is_err());
        assert!(validate_class_name("").is_err());
    }

    #[test]
    fn test_validate_class_name_rejects_reserved_words() {
        for name in ["None", "class", "True", "interface", "enum", "null"] {
            let err = validate_class_name(name).unwrap_err();
            assert!(err.to_string().contains("reserved word"), "{name} should be rejected");
        }
    }

    #[test]
    fn test_validate_class_name_rejects_artifact_names() {
        for name in ["ValidationMode", "TypedDict", "EventName", "SCHEMAS", "PostHogClient"] {
            let err = validate_class_name(name).unwrap_err();
            assert!(
                err.to_string().contains("clashes with a name the generated code defines"),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_generate_wrapper_rejects_class_name_matching_event_type() {
        let temp_dir = TempDir::new().unwrap();
        let schemas = temp_dir.path().join("schemas");
        fs::create_dir_all(&schemas).unwrap();
        fs::write(
            schemas.join("events.schema.json"),
            r#"{"events": {"page_viewed": {"type": "object"}}}"#,
        )
        .unwrap();

        let mut settings = settings_for(temp_dir.path(), Language::Python, "out.py");
        settings.class_name = "PageViewedProperties".to_string();

        let err = generate_wrapper(&settings).unwrap_err();
        assert!(err
            .to_string()
            .contains("clashes with the type generated for event 'page_viewed'"));
        assert!(!settings.output.exists());
    }

    #[test]
    fn test_generate_wrapper_writes_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let schemas = temp_dir.path().join("schemas");
        fs::create_dir_all(&schemas).unwrap();
        fs::write(
            schemas.join("events.schema.json"),
            r#"{"events": {"page_viewed": {"type": "object", "properties": {"url": {"type": "string"}}, "required": ["url"]}}}"#,
        )
        .unwrap();

        let settings = settings_for(temp_dir.path(), Language::Python, "out/posthog_generated.py");
        let summary = generate_wrapper(&settings).unwrap();

        assert_eq!(summary.event_count, 1);
        assert_eq!(summary.file_count, 1);
        assert!(summary.missing_references.is_empty());
        let content = fs::read_to_string(&settings.output).unwrap();
        assert!(content.contains("class PageViewedProperties(TypedDict):"));
        assert!(!temp_dir
            .path()
            .join("out/posthog_generated.py.hogtyped.tmp")
            .exists());
    }

    #[test]
    fn test_generate_wrapper_failure_keeps_previous_output() {
        let temp_dir = TempDir::new().unwrap();
        let schemas = temp_dir.path().join("schemas");
        fs::create_dir_all(&schemas).unwrap();
        fs::write(schemas.join("bad.schema.json"), "{ nope").unwrap();

        let settings = settings_for(temp_dir.path(), Language::Json, "schemas.json");
        fs::write(&settings.output, "previous").unwrap();

        assert!(generate_wrapper(&settings).is_err());
        assert_eq!(fs::read_to_string(&settings.output).unwrap(), "previous");
    }

    #[test]
    fn test_generate_wrapper_no_files() {
        let temp_dir = TempDir::new().unwrap();
        let settings = settings_for(temp_dir.path(), Language::Json, "schemas.json");

        let summary = generate_wrapper(&settings).unwrap();
        assert_eq!(summary.event_count, 0);
        assert_eq!(fs::read_to_string(&settings.output).unwrap().trim(), "{}");
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/out.py");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }
}
