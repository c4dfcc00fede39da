//! Reusable named schema definitions.
//!
//! A schema library holds named schemas loaded from a directory so that forms
//! can be built by name and schemas can reference each other with `$ref`.
//!
//! ## Example Schema Definition
//!
//! ```yaml
//! name: UserInput
//! description: Standard user information schema
//! schema:
//!   properties:
//!     name:
//!       type: string
//!     email:
//!       type: string
//!       format: email
//!   required:
//!     - name
//!     - email
//! ```
//!
//! ## Using Schema References
//!
//! Anywhere inside another definition:
//! ```yaml
//! schema:
//!   $ref: UserInput
//! ```
//!
//! References starting with `#` are local (`#/definitions/*`) and are left for
//! the schema parser.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{JsonSchema, SchemaError};

/// A named, reusable schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Unique name for this schema (used in $ref references)
    pub name: String,
    /// Human-readable description of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags for categorization and filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// The actual JSON Schema definition
    pub schema: Value,
}

/// Collection of named schemas
#[derive(Debug, Clone, Default)]
pub struct SchemaLibrary {
    definitions: Vec<SchemaDefinition>,
}

impl SchemaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json`, `*.yaml` and `*.yml` definition in `dir`.
    ///
    /// Files are read in path order; a later file with an existing name
    /// replaces the earlier definition.
    pub fn load_dir(dir: &Path) -> Result<Self, SchemaError> {
        let mut library = Self::new();
        let pattern = format!("{}/*", dir.display());

        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                        if matches!(ext, "json" | "yaml" | "yml") {
                            let definition: SchemaDefinition =
                                serde_json::from_value(load_value(&path)?)?;
                            debug!("Loaded schema '{}' from {}", definition.name, path.display());
                            library.insert(definition);
                        } else {
                            debug!("Skipping non-schema file {}", path.display());
                        }
                    }
                }
                Err(e) => warn!("Failed to read glob entry: {}", e),
            }
        }

        info!("Loaded {} schemas from {}", library.len(), dir.display());
        Ok(library)
    }

    /// Add a definition, replacing any definition with the same name
    pub fn insert(&mut self, definition: SchemaDefinition) {
        match self
            .definitions
            .iter_mut()
            .find(|existing| existing.name == definition.name)
        {
            Some(existing) => {
                warn!("Schema '{}' defined more than once, keeping the last one", definition.name);
                *existing = definition;
            }
            None => self.definitions.push(definition),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaDefinition> {
        self.definitions.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|s| s.name.as_str())
    }

    /// Definitions carrying the given tag
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a SchemaDefinition> {
        self.definitions
            .iter()
            .filter(move |s| s.tags.iter().any(|t| t == tag))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Resolve and parse the named schema
    pub fn resolve(&self, name: &str) -> Result<JsonSchema, SchemaError> {
        let definition = self
            .get(name)
            .ok_or_else(|| SchemaError::UnresolvedRef(name.to_string()))?;
        let mut visiting = HashSet::from([name.to_string()]);
        let resolved = self.resolve_value(&definition.schema, &mut visiting)?;
        JsonSchema::from_value(&resolved)
    }

    /// Replace every `{"$ref": "Name"}` object in `value` with the named schema
    pub fn resolve_refs(&self, value: &Value) -> Result<Value, SchemaError> {
        self.resolve_value(value, &mut HashSet::new())
    }

    fn resolve_value(
        &self,
        value: &Value,
        visiting: &mut HashSet<String>,
    ) -> Result<Value, SchemaError> {
        match value {
            Value::Object(map) => {
                // Check if this object is a $ref
                if let Some(name) = ref_name(value) {
                    let schema = self
                        .get(name)
                        .ok_or_else(|| SchemaError::UnresolvedRef(name.to_string()))?;

                    if !visiting.insert(name.to_string()) {
                        return Err(SchemaError::CyclicRef(name.to_string()));
                    }
                    let resolved = self.resolve_value(&schema.schema, visiting);
                    visiting.remove(name);
                    return resolved;
                }

                // Recursively resolve refs in nested objects
                let mut resolved = serde_json::Map::new();
                for (key, val) in map {
                    resolved.insert(key.clone(), self.resolve_value(val, visiting)?);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(arr) => arr
                .iter()
                .map(|v| self.resolve_value(v, visiting))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            // Other value types are returned as-is
            _ => Ok(value.clone()),
        }
    }
}

/// Extract the schema name from a library `$ref` value.
///
/// Local references (`#/...`) are not library references.
pub fn ref_name(value: &Value) -> Option<&str> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.get("$ref")
        .and_then(|v| v.as_str())
        .filter(|name| !name.starts_with('#'))
}

/// Read a JSON or YAML document, chosen by file extension
pub fn load_value(path: &Path) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        _ => Ok(serde_json::from_str(&content)?),
    }
}
