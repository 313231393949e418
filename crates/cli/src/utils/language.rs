//! Target language selection

use crate::error::{CliError, CliResult};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    TypeScript,
    Json,
}

impl Language {
    /// File extension of generated artifacts, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Python => "py",
            Self::TypeScript => "ts",
            Self::Json => "json",
        }
    }

    /// Default output path for this language.
    pub fn default_output(self) -> String {
        format!("./posthog_generated.{}", self.extension())
    }

    /// Infer the language from an output file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "py" | "pyi" => Some(Self::Python),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Python => "python",
            Self::TypeScript => "typescript",
            Self::Json => "json",
        })
    }
}

impl FromStr for Language {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "json" => Ok(Self::Json),
            _ => Err(CliError::Message(format!(
                "Unsupported language: {value}. Supported languages: python, typescript, json"
            ))),
        }
    }
}

/// Pick the target language.
/// Priority: CLI flag > Config > Output extension > Python
pub fn determine_language(
    cli_lang: Option<&str>,
    config_lang: Option<&str>,
    output: Option<&Path>,
) -> CliResult<Language> {
    if let Some(lang) = cli_lang.or(config_lang) {
        return lang.parse();
    }

    Ok(output
        .and_then(Language::from_extension)
        .unwrap_or(Language::Python))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_aliases() {
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("PY".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("ts".parse::<Language>().unwrap(), Language::TypeScript);
        assert_eq!("TypeScript".parse::<Language>().unwrap(), Language::TypeScript);
        assert_eq!("json".parse::<Language>().unwrap(), Language::Json);
    }

    #[test]
    fn test_parse_unsupported_language() {
        let err = "go".parse::<Language>().unwrap_err();
        assert!(err.to_string().contains("Unsupported language: go"));
    }

    #[test]
    fn test_determine_language_with_cli_flag() {
        let lang = determine_language(Some("typescript"), Some("python"), None).unwrap();
        assert_eq!(lang, Language::TypeScript);
    }

    #[test]
    fn test_determine_language_from_config() {
        let lang =
            determine_language(None, Some("json"), Some(Path::new("./out.py"))).unwrap();
        assert_eq!(lang, Language::Json);
    }

    #[test]
    fn test_determine_language_from_output_extension() {
        let lang = determine_language(None, None, Some(Path::new("src/analytics.ts"))).unwrap();
        assert_eq!(lang, Language::TypeScript);
        let lang = determine_language(None, None, Some(Path::new("schemas.JSON"))).unwrap();
        assert_eq!(lang, Language::Json);
    }

    #[test]
    fn test_determine_language_default() {
        assert_eq!(determine_language(None, None, None).unwrap(), Language::Python);
        assert_eq!(
            determine_language(None, None, Some(Path::new("wrapper.txt"))).unwrap(),
            Language::Python
        );
    }

    #[test]
    fn test_default_output() {
        assert_eq!(Language::Python.default_output(), "./posthog_generated.py");
        assert_eq!(Language::TypeScript.default_output(), "./posthog_generated.ts");
        assert_eq!(Language::Json.to_string(), "json");
    }
}
