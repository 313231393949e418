/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! JSON Pointer (RFC 6901) fragments as used by `$ref`.

use serde_json::Value;
use std::fmt;

/// A parsed `#/a/b` pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    segments: Vec<String>,
}

impl JsonPointer {
    /// Parse the fragment part of a reference.
    ///
    /// Accepts `#/a/b`, `/a/b`, `#` and the empty string (the last two
    /// point at the document root). Returns `None` for anything else, such
    /// as `#anchor`.
    pub fn parse(fragment: &str) -> Option<Self> {
        let body = fragment.strip_prefix('#').unwrap_or(fragment);
        if body.is_empty() {
            return Some(Self::root());
        }
        let body = body.strip_prefix('/')?;
        let segments = body.split('/').map(unescape).collect();
        Some(Self { segments })
    }

    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk `root` segment by segment. Any absent segment yields `None`.
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        for segment in &self.segments {
            write!(f, "/{}", escape_segment(segment))?;
        }
        Ok(())
    }
}

/// Escape one pointer segment: `~` becomes `~0`, then `/` becomes `~1`.
pub fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_internal_pointer() {
        let pointer = JsonPointer::parse("#/definitions/Shared").unwrap();
        assert_eq!(pointer.segments(), &["definitions", "Shared"]);
        assert_eq!(pointer.to_string(), "#/definitions/Shared");
    }

    #[test]
    fn test_parse_root_pointer() {
        assert!(JsonPointer::parse("#").unwrap().is_root());
        assert!(JsonPointer::parse("").unwrap().is_root());
    }

    #[test]
    fn test_anchor_is_not_a_pointer() {
        assert!(JsonPointer::parse("#anchor").is_none());
    }

    #[test]
    fn test_escaped_segments() {
        let pointer = JsonPointer::parse("#/paths/~1users~1{id}/a~0b").unwrap();
        assert_eq!(pointer.segments(), &["paths", "/users/{id}", "a~b"]);
        assert_eq!(pointer.to_string(), "#/paths/~1users~1{id}/a~0b");
    }

    #[test]
    fn test_escape_segment() {
        assert_eq!(escape_segment("plain"), "plain");
        assert_eq!(escape_segment("a/b"), "a~1b");
        assert_eq!(escape_segment("~1"), "~01");
        assert_eq!(unescape(&escape_segment("~/x~1")), "~/x~1");
    }

    #[test]
    fn test_lookup_walks_objects_and_arrays() {
        let doc = json!({"definitions": {"List": [{"type": "string"}, {"type": "integer"}]}});
        let pointer = JsonPointer::parse("#/definitions/List/1").unwrap();
        assert_eq!(pointer.lookup(&doc), Some(&json!({"type": "integer"})));
    }

    #[test]
    fn test_lookup_missing_segment_is_none() {
        let doc = json!({"definitions": {"A": {"type": "string"}}});
        let pointer = JsonPointer::parse("#/definitions/B/properties").unwrap();
        assert_eq!(pointer.lookup(&doc), None);
    }
}
