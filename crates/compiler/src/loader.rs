/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Schema loader.
//!
//! Parses every document of a generation run, resolves each event against
//! its owning document and produces the event set handed to projection.

use crate::error::{CompilerError, ParseError};
use crate::fragment::{Properties, SchemaFragment};
use crate::parser::{parse_schema_document, SchemaDocument};
use crate::projector::event_name_to_type;
use crate::resolver::{DocumentSource, MissingReference, Resolver};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// A fully resolved event, ready for projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEvent {
    pub event_name: String,
    pub type_name: String,
    /// Contains no `$ref` or `allOf`.
    pub schema: SchemaFragment,
    pub properties: Properties,
    pub required: Vec<String>,
    /// Document the event was declared in.
    pub source: PathBuf,
}

/// An event declared more than once. The later declaration is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEvent {
    pub event_name: String,
    pub previous: PathBuf,
    pub replacement: PathBuf,
}

/// Output of a load: events in descending name order plus diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSet {
    pub events: Vec<ResolvedEvent>,
    pub missing_references: Vec<MissingReference>,
    pub duplicates: Vec<DuplicateEvent>,
}

impl SchemaSet {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, event_name: &str) -> Option<&ResolvedEvent> {
        self.events.iter().find(|e| e.event_name == event_name)
    }
}

/// Load and resolve every event declared in `paths`.
///
/// Paths are processed in lexicographic order regardless of the order they
/// are given in. All documents are parsed before any event is resolved, so a
/// single malformed file aborts the load without partial results.
///
/// # Errors
///
/// - `CompilerError::Parse` if a document cannot be read or parsed
/// - `CompilerError::Resolution` for unsupported or cyclic references
pub fn load_events<S: DocumentSource>(
    paths: &[PathBuf],
    source: &S,
) -> Result<SchemaSet, CompilerError> {
    let mut sorted: Vec<&PathBuf> = paths.iter().collect();
    sorted.sort();
    sorted.dedup();

    let documents = sorted
        .into_iter()
        .map(|path| read_document(path, source))
        .collect::<Result<Vec<_>, _>>()?;

    let mut resolver = Resolver::new(source);
    for document in &documents {
        resolver.register(&document.path, document.root.clone());
    }

    let mut by_name: IndexMap<String, ResolvedEvent> = IndexMap::new();
    let mut duplicates = Vec::new();

    for document in &documents {
        tracing::debug!(
            file = %document.path.display(),
            events = document.event_count(),
            "resolving events"
        );
        for (event_name, raw) in document.events() {
            let fragment = SchemaFragment::from_value(raw);
            let schema = resolver.resolve(&fragment, &document.root, &document.path)?;
            let event = ResolvedEvent {
                event_name: event_name.clone(),
                type_name: event_name_to_type(event_name),
                properties: schema.properties(),
                required: schema.required(),
                schema,
                source: document.path.clone(),
            };

            if let Some(previous) = by_name.insert(event_name.clone(), event) {
                tracing::warn!(
                    event = %event_name,
                    previous = %previous.source.display(),
                    replacement = %document.path.display(),
                    "duplicate event definition, keeping the last one"
                );
                duplicates.push(DuplicateEvent {
                    event_name: event_name.clone(),
                    previous: previous.source,
                    replacement: document.path.clone(),
                });
            }
        }
    }

    let mut events: Vec<ResolvedEvent> = by_name.into_values().collect();
    events.sort_by(|a, b| b.event_name.cmp(&a.event_name));

    Ok(SchemaSet {
        events,
        missing_references: resolver.take_missing_references(),
        duplicates,
    })
}

fn read_document<S: DocumentSource>(
    path: &Path,
    source: &S,
) -> Result<SchemaDocument, CompilerError> {
    let display = path.display().to_string();
    let content = source.read(path)?.ok_or_else(|| ParseError::Read {
        file: display.clone(),
        message: "file not found".to_string(),
    })?;
    parse_schema_document(&content, path)
        .map_err(|err| CompilerError::Parse(ParseError::from_parser(&display, err)))
}
