//! Python source literals for JSON values

use serde_json::Value;

const INDENT: &str = "    ";

/// Python keywords that cannot be used as identifiers.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// TypeScript reserved and strict-mode words that cannot name a class.
pub const TYPESCRIPT_RESERVED_WORDS: &[&str] = &[
    "any", "arguments", "boolean", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in", "instanceof", "interface",
    "let", "never", "new", "null", "number", "package", "private", "protected", "public",
    "return", "static", "string", "super", "switch", "symbol", "this", "throw", "true", "try",
    "typeof", "undefined", "unknown", "var", "void", "while", "with", "yield",
];

/// Render `value` as a Python expression.
///
/// Nested containers are indented from `level`; arrays holding only scalars
/// stay on one line.
pub fn python_literal(value: &Value, level: usize) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => python_string(s),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) if items.iter().all(is_scalar) => {
            let parts: Vec<String> = items.iter().map(|v| python_literal(v, level)).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Array(items) => {
            let inner = INDENT.repeat(level + 1);
            let parts: Vec<String> = items
                .iter()
                .map(|v| format!("{inner}{}", python_literal(v, level + 1)))
                .collect();
            format!("[\n{}\n{}]", parts.join(",\n"), INDENT.repeat(level))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let inner = INDENT.repeat(level + 1);
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{inner}{}: {}", python_string(k), python_literal(v, level + 1)))
                .collect();
            format!("{{\n{}\n{}}}", parts.join(",\n"), INDENT.repeat(level))
        }
    }
}

/// A double-quoted Python string literal.
pub fn python_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Text safe to place inside a `"""` docstring.
///
/// Every quote is escaped so none can merge with the closing delimiter.
pub fn python_docstring(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Whether `name` can be used as a Python attribute or class-body name.
pub fn is_python_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    valid_start
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !PYTHON_KEYWORDS.contains(&name)
}

/// Whether `name` can be used unquoted as a TypeScript property key.
pub fn is_typescript_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(python_literal(&json!(null), 0), "None");
        assert_eq!(python_literal(&json!(true), 0), "True");
        assert_eq!(python_literal(&json!(false), 0), "False");
        assert_eq!(python_literal(&json!(1.5), 0), "1.5");
        assert_eq!(python_literal(&json!("a\"b"), 0), r#""a\"b""#);
    }

    #[test]
    fn test_scalar_array_stays_on_one_line() {
        assert_eq!(
            python_literal(&json!(["free", "pro", null]), 2),
            r#"["free", "pro", None]"#
        );
    }

    #[test]
    fn test_nested_object() {
        let value = json!({
            "type": "object",
            "properties": {"plan": {"type": "string", "enum": ["free", "pro"]}},
            "required": ["plan"],
            "additionalProperties": false
        });
        let expected = r#"{
    "type": "object",
    "properties": {
        "plan": {
            "type": "string",
            "enum": ["free", "pro"]
        }
    },
    "required": ["plan"],
    "additionalProperties": False
}"#;
        assert_eq!(python_literal(&value, 0), expected);
    }

    #[test]
    fn test_array_of_objects_is_multi_line() {
        let value = json!([{"a": 1}]);
        assert_eq!(python_literal(&value, 0), "[\n    {\n        \"a\": 1\n    }\n]");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(python_literal(&json!({}), 3), "{}");
        assert_eq!(python_literal(&json!([]), 3), "[]");
    }

    #[test]
    fn test_python_string_escapes() {
        assert_eq!(python_string("line\nbreak\\"), r#""line\nbreak\\""#);
        assert_eq!(python_string("\u{1}"), r#""\u0001""#);
    }

    #[test]
    fn test_python_docstring() {
        assert_eq!(python_docstring(r#"say """hi""""#), r#"say \"\"\"hi\"\"\""#);
        assert_eq!(python_docstring(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(python_docstring(r"C:\path"), r"C:\\path");
    }

    #[test]
    fn test_identifiers() {
        assert!(is_python_identifier("userId"));
        assert!(is_python_identifier("_private"));
        assert!(!is_python_identifier("class"));
        assert!(!is_python_identifier("first-name"));
        assert!(!is_python_identifier("1st"));
        assert!(!is_python_identifier(""));

        assert!(is_typescript_identifier("$set"));
        assert!(is_typescript_identifier("class"));
        assert!(!is_typescript_identifier("first name"));
    }
}
