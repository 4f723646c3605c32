//! Specification loader for reading resource definitions from disk
//!
//! - A single document file, or every `*.json` file of a directory
//! - Definitions from all files share one namespace
//! - A name defined twice is a FATAL error

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::specification::{parse_definitions, stamp_ref_id, Specification, DEFINITIONS_PREFIX};
use super::types::SchemaNode;
use crate::observability::{log_event_with_fields, Event};

/// Accumulates definitions from files and in-memory registrations, then
/// freezes them into a [`Specification`].
pub struct SpecificationLoader {
    /// Loaded definitions indexed by resource name
    definitions: HashMap<String, SchemaNode>,
    /// Number of documents read so far
    documents: usize,
}

impl SpecificationLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
            documents: 0,
        }
    }

    /// Loads a single specification file.
    pub fn load(path: &Path) -> SchemaResult<Specification> {
        let mut loader = Self::new();
        loader.load_file(path)?;
        Ok(loader.into_specification())
    }

    /// Loads every `*.json` document in a directory.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<()> {
        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed(
                dir.display().to_string(),
                format!("Failed to read specification directory: {}", e),
            )
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }

        // Deterministic load order
        paths.sort();
        for path in paths {
            self.load_file(&path)?;
        }

        Ok(())
    }

    /// Loads one document file into the loader.
    pub fn load_file(&mut self, path: &Path) -> SchemaResult<()> {
        let source = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::malformed(&source, format!("Failed to read file: {}", e)))?;

        let document: Value = serde_json::from_str(&content)
            .map_err(|e| SchemaError::malformed(&source, format!("Invalid JSON: {}", e)))?;

        self.load_document(&document, &source)
    }

    /// Loads the definitions of an already parsed document.
    pub fn load_document(&mut self, document: &Value, source: &str) -> SchemaResult<()> {
        let definitions = parse_definitions(document, source)?;
        let count = definitions.len();

        for (name, node) in definitions {
            self.insert(name, node)?;
        }
        self.documents += 1;

        log_event_with_fields(
            Event::SpecificationLoaded,
            &[("source", source), ("definitions", count.to_string().as_str())],
        );

        Ok(())
    }

    /// Registers a definition directly (for testing or programmatic creation).
    ///
    /// An object node without a ref id gets `#/definitions/<name>`.
    pub fn register(&mut self, name: impl Into<String>, node: SchemaNode) -> SchemaResult<()> {
        let name = name.into();
        let node = stamp_ref_id(node, DEFINITIONS_PREFIX, &name);
        self.insert(name, node)
    }

    fn insert(&mut self, name: String, node: SchemaNode) -> SchemaResult<()> {
        if self.definitions.contains_key(&name) {
            return Err(SchemaError::duplicate(name));
        }
        self.definitions.insert(name, node);
        Ok(())
    }

    /// Returns the number of loaded definitions.
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Returns the number of documents read.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Freezes the loaded definitions.
    pub fn into_specification(self) -> Specification {
        Specification::from_map(self.definitions)
    }
}

impl Default for SpecificationLoader {
    fn default() -> Self {
        Self::new()
    }
}
