//! File-backed source resolver.
//!
//! Resolves a source identifier to a `conf.<identifier>.toml` file looked up
//! across an ordered list of search directories (first match wins), parses
//! it as TOML, and deep-merges its content over the current entries.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;
use crate::merge::deep_merge;
use crate::source::SourceResolver;

/// Resolves named sources to TOML files on a search path.
#[derive(Debug, Clone, Default)]
pub struct FileResolver {
    search_paths: Vec<PathBuf>,
}

impl FileResolver {
    /// Create a resolver over an ordered list of search directories.
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Create a resolver over a single directory.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            search_paths: vec![path.into()],
        }
    }

    /// Append a directory to the end of the search path.
    pub fn add_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    /// First existing `conf.<identifier>.toml` on the search path.
    fn locate(&self, identifier: &str) -> Option<PathBuf> {
        // Identifiers are plain names, never paths.
        if identifier.contains(['/', '\\']) {
            return None;
        }

        let file_name = format!("conf.{identifier}.toml");
        self.search_paths
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
    }

    fn read(&self, identifier: &str, path: &Path) -> Result<Value, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            identifier: identifier.to_string(),
            message: err.to_string(),
        })?;

        let table: toml::Value = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
            identifier: identifier.to_string(),
            message: err.to_string(),
        })?;

        Ok(toml_to_json(table))
    }
}

impl SourceResolver for FileResolver {
    fn exists(&self, identifier: &str) -> bool {
        self.locate(identifier).is_some()
    }

    fn load(&self, identifier: &str, current: Value) -> Result<Value, ConfigError> {
        let path = self
            .locate(identifier)
            .ok_or_else(|| ConfigError::SourceNotFound {
                identifier: identifier.to_string(),
            })?;

        let loaded = self.read(identifier, &path)?;
        debug!(identifier, path = %path.display(), "read config source file");

        Ok(deep_merge(current, loaded))
    }
}

/// Convert a TOML value to a JSON value.
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            Value::Object(map)
        }
    }
}
