/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Reference resolver.
//!
//! Turns a schema fragment into a self-contained one:
//! - `$ref` pointers are followed (same document, or `./`/`../` files with an
//!   optional `#/...` fragment) and replaced by their resolved target
//! - `allOf` compositions are merged into a single object schema
//! - everything else is walked recursively, keys preserved
//!
//! Missing targets resolve to an absent schema and are recorded as
//! diagnostics. Unsupported schemes and reference cycles are hard errors.

pub mod source;

use crate::error::{ParseError, ResolutionError};
use crate::fragment::{
    ArraySchema, JsonPointer, ObjectSchema, PrimitiveSchema, Properties, SchemaFragment,
};
use crate::parser::utils::parse_document_content;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

pub use source::{DocumentSource, MemorySource};

/// A `$ref` whose target does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReference {
    pub reference: String,
    /// Document the reference appeared in.
    pub file: String,
}

impl fmt::Display for MissingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unresolved reference '{}' in {}", self.reference, self.file)
    }
}

/// One step of the active reference chain: a document plus a pointer into it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChainEntry {
    file: PathBuf,
    pointer: JsonPointer,
}

impl fmt::Display for ChainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.display(), self.pointer)
    }
}

enum ReferenceTarget<'a> {
    Internal(JsonPointer),
    External { file: &'a str, pointer: JsonPointer },
}

impl<'a> ReferenceTarget<'a> {
    /// `None` for anything other than `#...` pointers and `./`/`../` paths.
    fn parse(reference: &'a str) -> Option<Self> {
        if reference.starts_with('#') {
            return JsonPointer::parse(reference).map(Self::Internal);
        }
        if !(reference.starts_with("./") || reference.starts_with("../")) {
            return None;
        }
        let (file, fragment) = match reference.split_once('#') {
            Some((file, fragment)) => (file, fragment),
            None => (reference, ""),
        };
        let pointer = JsonPointer::parse(fragment)?;
        Some(Self::External { file, pointer })
    }
}

/// Resolves `$ref` and `allOf` against a set of documents.
///
/// Documents passed to [`Resolver::register`] are reused when another file
/// points at them; anything else is read through the `DocumentSource` once
/// and cached.
pub struct Resolver<S> {
    source: S,
    documents: HashMap<PathBuf, Rc<Value>>,
    active: Vec<ChainEntry>,
    missing: Vec<MissingReference>,
}

impl<S: DocumentSource> Resolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            documents: HashMap::new(),
            active: Vec::new(),
            missing: Vec::new(),
        }
    }

    /// Make an already parsed document available to external references.
    pub fn register(&mut self, path: &Path, document: Value) {
        self.documents
            .insert(normalize_path(path), Rc::new(document));
    }

    /// Missing references recorded so far.
    pub fn missing_references(&self) -> &[MissingReference] {
        &self.missing
    }

    pub fn take_missing_references(&mut self) -> Vec<MissingReference> {
        std::mem::take(&mut self.missing)
    }

    /// Resolve `fragment`, which lives in document `root` at `current`.
    ///
    /// The result contains no `Reference` or `Composition` node. Resolving
    /// an already resolved fragment returns it unchanged.
    ///
    /// # Errors
    ///
    /// - `UnsupportedReference` for any `$ref` that is neither `#...` nor a
    ///   relative `./`/`../` path
    /// - `CyclicReference` when a reference leads back to itself
    /// - `ExternalDocument` when a referenced file cannot be read or parsed
    pub fn resolve(
        &mut self,
        fragment: &SchemaFragment,
        root: &Value,
        current: &Path,
    ) -> Result<SchemaFragment, ResolutionError> {
        if !fragment.is_truthy() {
            return Ok(fragment.clone());
        }

        match fragment {
            SchemaFragment::Reference(reference) => {
                self.resolve_reference(reference, root, current)
            }
            SchemaFragment::Composition(members) => {
                let resolved = members
                    .iter()
                    .map(|member| self.resolve(member, root, current))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(merge_all_of(&resolved))
            }
            SchemaFragment::Primitive(schema) => {
                let enum_values = match &schema.enum_values {
                    Some(values) => Some(
                        values
                            .iter()
                            .map(|value| self.resolve_raw(value, root, current))
                            .collect::<Result<Vec<_>, _>>()?,
                    ),
                    None => None,
                };
                Ok(SchemaFragment::Primitive(PrimitiveSchema {
                    kind: schema.kind,
                    enum_values,
                    annotations: self.resolve_map(&schema.annotations, root, current)?,
                }))
            }
            SchemaFragment::Array(schema) => {
                let items = match &schema.items {
                    Some(items) => Some(Box::new(self.resolve(items, root, current)?)),
                    None => None,
                };
                Ok(SchemaFragment::Array(ArraySchema {
                    items,
                    annotations: self.resolve_map(&schema.annotations, root, current)?,
                }))
            }
            SchemaFragment::Object(schema) => {
                let properties = match &schema.properties {
                    Some(properties) => {
                        let mut resolved = Properties::with_capacity(properties.len());
                        for (name, property) in properties {
                            resolved.insert(name.clone(), self.resolve(property, root, current)?);
                        }
                        Some(resolved)
                    }
                    None => None,
                };
                let additional_properties = match &schema.additional_properties {
                    Some(additional) => Some(Box::new(self.resolve(additional, root, current)?)),
                    None => None,
                };
                Ok(SchemaFragment::Object(ObjectSchema {
                    properties,
                    required: schema.required.clone(),
                    additional_properties,
                    annotations: self.resolve_map(&schema.annotations, root, current)?,
                }))
            }
            SchemaFragment::Any(value) => {
                Ok(SchemaFragment::Any(self.resolve_raw(value, root, current)?))
            }
        }
    }

    fn resolve_reference(
        &mut self,
        reference: &str,
        root: &Value,
        current: &Path,
    ) -> Result<SchemaFragment, ResolutionError> {
        match ReferenceTarget::parse(reference) {
            Some(ReferenceTarget::Internal(pointer)) => {
                let entry = ChainEntry {
                    file: normalize_path(current),
                    pointer,
                };
                self.enter(&entry)?;
                let result = match entry.pointer.lookup(root) {
                    Some(target) => {
                        tracing::trace!(reference, file = %current.display(), "following internal reference");
                        let target = SchemaFragment::from_value(target);
                        self.resolve(&target, root, current)
                    }
                    None => Ok(self.record_missing(reference, current)),
                };
                self.active.pop();
                result
            }
            Some(ReferenceTarget::External { file, pointer }) => {
                let target_path = normalize_path(&base_dir(current).join(file));
                let entry = ChainEntry {
                    file: target_path,
                    pointer,
                };
                self.enter(&entry)?;
                let result = self.resolve_external(reference, &entry, current);
                self.active.pop();
                result
            }
            None => Err(ResolutionError::UnsupportedReference {
                reference: reference.to_string(),
                file: current.display().to_string(),
            }),
        }
    }

    fn resolve_external(
        &mut self,
        reference: &str,
        entry: &ChainEntry,
        current: &Path,
    ) -> Result<SchemaFragment, ResolutionError> {
        let Some(document) = self.load(&entry.file)? else {
            return Ok(self.record_missing(reference, current));
        };
        match entry.pointer.lookup(&document) {
            Some(target) => {
                tracing::trace!(reference, target = %entry.file.display(), "following external reference");
                let target = SchemaFragment::from_value(target);
                self.resolve(&target, &document, &entry.file)
            }
            None => Ok(self.record_missing(reference, current)),
        }
    }

    /// Walk raw JSON, resolving any `$ref`/`allOf` node found inside it.
    fn resolve_raw(
        &mut self,
        value: &Value,
        root: &Value,
        current: &Path,
    ) -> Result<Value, ResolutionError> {
        match value {
            Value::Object(map) if is_unresolved_node(map) => {
                let fragment = SchemaFragment::from_value(value);
                Ok(self.resolve(&fragment, root, current)?.to_value())
            }
            Value::Object(map) => Ok(Value::Object(self.resolve_map(map, root, current)?)),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_raw(item, root, current))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            _ => Ok(value.clone()),
        }
    }

    fn resolve_map(
        &mut self,
        map: &Map<String, Value>,
        root: &Value,
        current: &Path,
    ) -> Result<Map<String, Value>, ResolutionError> {
        let mut resolved = Map::new();
        for (key, value) in map {
            resolved.insert(key.clone(), self.resolve_raw(value, root, current)?);
        }
        Ok(resolved)
    }

    fn enter(&mut self, entry: &ChainEntry) -> Result<(), ResolutionError> {
        if let Some(start) = self.active.iter().position(|active| active == entry) {
            let mut chain: Vec<String> = self.active[start..]
                .iter()
                .map(ToString::to_string)
                .collect();
            chain.push(entry.to_string());
            return Err(ResolutionError::CyclicReference { chain });
        }
        self.active.push(entry.clone());
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<Option<Rc<Value>>, ResolutionError> {
        if let Some(document) = self.documents.get(path) {
            return Ok(Some(Rc::clone(document)));
        }
        let Some(content) = self.source.read(path)? else {
            return Ok(None);
        };
        let file = path.display().to_string();
        let document = parse_document_content(&content, &file)
            .map_err(|err| ParseError::from_parser(&file, err))?;
        tracing::debug!(file = %path.display(), "loaded referenced document");
        let document = Rc::new(document);
        self.documents
            .insert(path.to_path_buf(), Rc::clone(&document));
        Ok(Some(document))
    }

    fn record_missing(&mut self, reference: &str, current: &Path) -> SchemaFragment {
        let missing = MissingReference {
            reference: reference.to_string(),
            file: current.display().to_string(),
        };
        tracing::warn!("{missing}, treating as untyped");
        self.missing.push(missing);
        SchemaFragment::absent()
    }
}

/// Merge resolved `allOf` members into one object schema.
///
/// Properties are unioned with later members overwriting earlier ones,
/// `required` is unioned keeping first-occurrence order, and
/// `additionalProperties` comes from the last member that declares it.
/// Members that are not objects contribute nothing.
pub fn merge_all_of(members: &[SchemaFragment]) -> SchemaFragment {
    let mut properties = Properties::new();
    let mut required: Vec<String> = Vec::new();
    let mut additional_properties = None;

    for member in members {
        properties.extend(member.properties());
        for name in member.required() {
            if !required.contains(&name) {
                required.push(name);
            }
        }
        if let Some(additional) = member.additional_properties() {
            additional_properties = Some(Box::new(additional));
        }
    }

    SchemaFragment::Object(ObjectSchema {
        properties: Some(properties),
        required: Some(required),
        additional_properties,
        annotations: Map::new(),
    })
}

/// Lexically normalise a path: drop `.`, fold `..` into its parent.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn base_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

fn is_unresolved_node(map: &Map<String, Value>) -> bool {
    matches!(map.get("$ref"), Some(Value::String(_)))
        || matches!(map.get("allOf"), Some(Value::Array(_)))
}
