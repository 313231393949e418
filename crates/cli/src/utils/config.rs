//! Config file reading utilities

use crate::error::{CliError, CliResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Project config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "hogtyped.config.yaml";

/// `hogtyped.config.yaml`. Every key is optional; command-line flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub schemas: Option<String>,
    pub output: Option<String>,
    pub class_name: Option<String>,
    pub mode: Option<String>,
    pub language: Option<String>,
}

/// Read the project config from the working directory.
///
/// A missing file is the same as an empty one.
pub fn read_config() -> CliResult<ConfigFile> {
    read_config_from(Path::new(CONFIG_FILE))
}

pub fn read_config_from(config_path: &Path) -> CliResult<ConfigFile> {
    if !config_path.exists() {
        return Ok(ConfigFile::default());
    }

    let config_content = fs::read_to_string(config_path)
        .map_err(|e| CliError::Message(format!("Failed to read config file: {e}")))?;

    if config_content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(&config_content).map_err(|e| {
        CliError::Message(format!(
            "Failed to parse config file {}: {e}",
            config_path.display()
        ))
    })
}
