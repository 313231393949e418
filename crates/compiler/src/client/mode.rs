/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use std::fmt;
use std::str::FromStr;

/// How a typed client reacts to events that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Reject the event; nothing is forwarded.
    Strict,
    /// Forward a `$schema_validation_warning` event, then the event itself.
    #[default]
    Warning,
    /// Never validate.
    Disabled,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Warning => "warning",
            Self::Disabled => "disabled",
        }
    }

    /// Upper-case name as used for generated enum members.
    pub fn constant_name(self) -> &'static str {
        match self {
            Self::Strict => "STRICT",
            Self::Warning => "WARNING",
            Self::Disabled => "DISABLED",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "warning" => Ok(Self::Warning),
            "disabled" => Ok(Self::Disabled),
            other => Err(format!(
                "Invalid validation mode '{other}'. Expected one of: strict, warning, disabled"
            )),
        }
    }
}
