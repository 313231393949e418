/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

#[cfg(test)]
mod tests {
    use super::super::*;
    use serde_json::json;

    #[test]
    fn test_validate_valid_document() {
        let validator = Validator::new();
        let valid_data = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "definitions": {
                "PageView": {
                    "type": "object",
                    "properties": {"url": {"type": "string"}},
                    "required": ["url"]
                }
            },
            "events": {
                "page_viewed": {"$ref": "#/definitions/PageView"},
                "button_clicked": {
                    "type": "object",
                    "properties": {
                        "label": {"type": "string"},
                        "variant": {"type": "string", "enum": ["primary", "secondary"]}
                    },
                    "required": ["label"]
                }
            }
        });

        let result = validator.validate_document("events.schema.json", &valid_data);
        assert!(result.valid, "Valid document should pass validation: {:?}", result.errors);
        assert_eq!(result.errors.len(), 0);
    }

    #[test]
    fn test_validate_document_without_events() {
        let validator = Validator::new();
        let result = validator.validate_document("defs.json", &json!({"definitions": {}}));
        assert!(result.valid);
    }

    #[test]
    fn test_validate_events_must_be_object() {
        let validator = Validator::new();
        let result = validator.validate_document("a.json", &json!({"events": ["page_viewed"]}));
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.path.as_deref() == Some("/events")));
    }

    #[test]
    fn test_validate_event_must_be_schema_object() {
        let validator = Validator::new();
        let result = validator.validate_document("a.json", &json!({"events": {"bad": "string"}}));
        assert!(!result.valid);
        let error = result
            .errors
            .iter()
            .find(|e| e.path.as_deref() == Some("/events/bad"))
            .expect("error for /events/bad");
        assert!(error.suggestion.is_some());
    }

    #[test]
    fn test_validate_unknown_type_name() {
        let validator = Validator::new();
        let result = validator.validate_document(
            "a.json",
            &json!({"events": {"e": {"type": "obj"}}}),
        );
        assert!(!result.valid);
    }

    #[test]
    fn test_validate_duplicate_required_names() {
        let validator = Validator::new();
        let result = validator.validate_document(
            "a.json",
            &json!({"events": {"e": {"type": "object", "required": ["x", "x"]}}}),
        );
        assert!(!result.valid);
    }

    #[test]
    fn test_validate_empty_event_name() {
        let validator = Validator::new();
        let result = validator.validate_document(
            "a.json",
            &json!({"events": {" ": {"type": "object"}}}),
        );
        assert!(!result.valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("Event name must not be empty")));
    }

    #[test]
    fn test_validate_unresolvable_reference_with_suggestion() {
        let validator = Validator::new();
        let result = validator.validate_document(
            "events.schema.json",
            &json!({
                "definitions": {"PageView": {"type": "object"}},
                "events": {"page_viewed": {"$ref": "#/definitions/PageVeiw"}}
            }),
        );

        assert!(!result.valid);
        let error = result
            .errors
            .iter()
            .find(|e| e.message.contains("Unresolvable reference"))
            .expect("unresolvable reference error");
        assert_eq!(error.path.as_deref(), Some("/events/page_viewed/$ref"));
        assert_eq!(
            error.suggestion.as_deref(),
            Some("Did you mean '#/definitions/PageView'?")
        );
    }

    #[test]
    fn test_validate_unresolvable_reference_without_close_match() {
        let validator = Validator::new();
        let result = validator.validate_document(
            "a.json",
            &json!({
                "definitions": {"PageView": {"type": "object"}},
                "events": {"e": {"type": "object", "properties": {"p": {"$ref": "#/definitions/Zzz"}}}}
            }),
        );
        let error = result
            .errors
            .iter()
            .find(|e| e.message.contains("Unresolvable reference"))
            .expect("unresolvable reference error");
        assert_eq!(error.path.as_deref(), Some("/events/e/properties/p/$ref"));
        assert!(error.suggestion.is_none());
    }

    #[test]
    fn test_validate_unsupported_reference() {
        let validator = Validator::new();
        let result = validator.validate_document(
            "a.json",
            &json!({"events": {"e": {"$ref": "https://example.com/e.json"}}}),
        );
        assert!(!result.valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.message == "Unsupported reference 'https://example.com/e.json'"));
    }

    #[test]
    fn test_relative_file_references_are_not_checked_here() {
        let validator = Validator::new();
        let result = validator.validate_document(
            "a.json",
            &json!({"events": {"e": {"$ref": "./common.json#/definitions/E"}}}),
        );
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn test_validate_duplicate_events_across_documents() {
        let validator = Validator::new();
        let documents = vec![
            (
                "a.schema.json".to_string(),
                json!({"events": {"shared": {"type": "object"}, "only_a": {"type": "object"}}}),
            ),
            (
                "b.schema.json".to_string(),
                json!({"events": {"shared": {"type": "object"}}}),
            ),
        ];

        let result = validator.validate_documents(&documents);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].file, "b.schema.json");
        assert!(result.errors[0].message.contains("a.schema.json"));
    }

    #[test]
    fn test_validate_type_name_collision_across_documents() {
        let validator = Validator::new();
        let documents = vec![
            (
                "a.schema.json".to_string(),
                json!({"events": {"user_signed_up": {"type": "object"}}}),
            ),
            (
                "b.schema.json".to_string(),
                json!({"events": {"user-signed-up": {"type": "object"}}}),
            ),
        ];

        let result = validator.validate_documents(&documents);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        let error = &result.errors[0];
        assert_eq!(error.file, "b.schema.json");
        assert_eq!(error.path.as_deref(), Some("/events/user-signed-up"));
        assert!(error.message.contains("'UserSignedUpProperties'"));
        assert!(error.message.contains("'user_signed_up' in a.schema.json"));
    }

    #[test]
    fn test_validate_type_name_collision_within_one_document() {
        let validator = Validator::new();
        let documents = vec![(
            "a.schema.json".to_string(),
            json!({"events": {"Page Viewed": {"type": "object"}, "page_viewed": {"type": "object"}}}),
        )];

        let result = validator.validate_documents(&documents);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("'PageViewedProperties'"));
    }

    #[test]
    fn test_validate_documents_collects_errors_from_each_file() {
        let validator = Validator::new();
        let documents = vec![
            ("a.json".to_string(), json!({"events": {"e": {"$ref": "#/nope"}}})),
            ("b.json".to_string(), json!({"events": {"f": {"$ref": "http://x"}}})),
        ];
        let result = validator.validate_documents(&documents);
        let files: Vec<&str> = result.errors.iter().map(|e| e.file.as_str()).collect();
        assert!(files.contains(&"a.json"));
        assert!(files.contains(&"b.json"));
    }

    #[test]
    fn test_with_custom_schema() {
        let validator = Validator::with_schema(json!({"type": "object", "required": ["events"]}));
        let result = validator.validate_document("a.json", &json!({}));
        assert!(!result.valid);
    }

    #[test]
    fn test_format_errors() {
        use super::super::error::ValidationError;
        let validator = Validator::new();
        let errors = vec![ValidationError {
            file: "events.schema.json".to_string(),
            line: None,
            column: None,
            path: Some("/events/page_viewed/$ref".to_string()),
            message: "Unresolvable reference '#/definitions/PageVeiw'".to_string(),
            suggestion: Some("Did you mean '#/definitions/PageView'?".to_string()),
        }];
        let formatted = validator.format_errors(&errors);
        assert!(formatted.starts_with("✗ Validation failed"));
        assert!(formatted.contains("events.schema.json"));
        assert!(formatted.contains("  Path: /events/page_viewed/$ref"));
        assert!(formatted.contains("  Suggestion: Did you mean"));
    }

    #[test]
    fn test_format_errors_with_line_and_column() {
        use super::super::error::ValidationError;
        let validator = Validator::new();
        let errors = vec![ValidationError {
            file: "events.yaml".to_string(),
            line: Some(5),
            column: Some(3),
            path: None,
            message: "Invalid file".to_string(),
            suggestion: None,
        }];
        let formatted = validator.format_errors(&errors);
        assert!(formatted.contains("events.yaml:5:3"));
    }

    #[test]
    fn test_format_no_errors() {
        assert_eq!(Validator::new().format_errors(&[]), "");
    }
}
