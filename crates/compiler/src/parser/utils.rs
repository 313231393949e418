/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Utility functions for parsing schema documents.
 * Works only with in-memory strings (no file I/O).
 */

use crate::parser::error::ParseError;
use serde_json::Value;
use yaml_rust::{Yaml, YamlLoader};

/// Parse a schema document from a string.
///
/// Documents whose path ends in `.yaml` or `.yml` are parsed as YAML. Every
/// other path is parsed strictly as JSON.
///
/// # Errors
///
/// Returns `ParseError::InvalidJson` / `ParseError::InvalidYaml` when the
/// content cannot be parsed in the selected format.
pub fn parse_document_content(content: &str, file_path: &str) -> Result<Value, ParseError> {
    if is_yaml_path(file_path) {
        parse_yaml(content).map_err(ParseError::InvalidYaml)
    } else {
        parse_json(content).map_err(ParseError::InvalidJson)
    }
}

/// Whether a path names a YAML document.
pub fn is_yaml_path(file_path: &str) -> bool {
    let lower = file_path.to_lowercase();
    lower.ends_with(".yaml") || lower.ends_with(".yml")
}

fn parse_json(content: &str) -> Result<Value, String> {
    serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))
}

/// Parse YAML content with `yaml-rust`, then convert it to `serde_json::Value`.
fn parse_yaml(content: &str) -> Result<Value, String> {
    let docs = YamlLoader::load_from_str(content).map_err(|e| format!("YAML parse error: {e}"))?;

    let first = docs
        .first()
        .ok_or_else(|| "YAML document is empty".to_string())?;

    yaml_to_json_value(first).ok_or_else(|| "Failed to convert YAML to JSON value".to_string())
}

fn yaml_to_json_value(yaml: &Yaml) -> Option<Value> {
    match yaml {
        Yaml::Real(s) => s
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .or_else(|| Some(Value::String(s.clone()))),
        Yaml::Integer(i) => Some(Value::Number(serde_json::Number::from(*i))),
        Yaml::String(s) => Some(Value::String(s.clone())),
        Yaml::Boolean(b) => Some(Value::Bool(*b)),
        Yaml::Array(arr) => Some(Value::Array(
            arr.iter().filter_map(yaml_to_json_value).collect(),
        )),
        Yaml::Hash(hash) => {
            let mut map = serde_json::Map::new();
            for (k, v) in hash {
                if let (Some(key), Some(value)) = (yaml_key(k), yaml_to_json_value(v)) {
                    map.insert(key, value);
                }
            }
            Some(Value::Object(map))
        }
        Yaml::Null => Some(Value::Null),
        Yaml::BadValue | Yaml::Alias(_) => None,
    }
}

fn yaml_key(yaml: &Yaml) -> Option<String> {
    match yaml {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_document() {
        let json = r#"{"events": {"a": {"type": "object"}}, "n": 42}"#;
        let result = parse_document_content(json, "a.schema.json").unwrap();
        assert_eq!(result["events"]["a"]["type"], "object");
        assert_eq!(result["n"], 42);
    }

    #[test]
    fn test_parse_yaml_document() {
        let yaml = r#"
events:
  page_viewed:
    type: object
    required: [url]
    properties:
      url:
        type: string
      depth:
        type: integer
        minimum: -1
"#;
        let result = parse_document_content(yaml, "events.schema.yaml").unwrap();
        assert_eq!(result["events"]["page_viewed"]["required"][0], "url");
        assert_eq!(
            result["events"]["page_viewed"]["properties"]["depth"]["minimum"],
            -1
        );
    }

    #[test]
    fn test_yaml_preserves_key_order() {
        let yaml = "b: 1\na: 2\nc: 3\n";
        let result = parse_document_content(yaml, "x.yml").unwrap();
        let keys: Vec<&String> = result.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unknown_extension_is_strict_json() {
        let yaml = "events: {}";
        let result = parse_document_content(yaml, "events.schema");
        assert!(matches!(result, Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_invalid_json() {
        let invalid = r#"{"key": unclosed"#;
        let result = parse_document_content(invalid, "bad.json");
        assert!(matches!(result, Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let invalid = "key: [unclosed";
        let result = parse_document_content(invalid, "bad.yaml");
        assert!(matches!(result, Err(ParseError::InvalidYaml(_))));
    }

    #[test]
    fn test_is_yaml_path() {
        assert!(is_yaml_path("a.yaml"));
        assert!(is_yaml_path("A.YML"));
        assert!(!is_yaml_path("a.json"));
    }
}
