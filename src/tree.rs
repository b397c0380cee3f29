//! The configuration tree container.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::key::Key;
use crate::source::SourceResolver;
use crate::value::ConfigValue;

/// Nested configuration container.
///
/// A tree of key/value entries in insertion order. Nested mappings in the
/// bootstrap data (and in anything written or loaded later) are normalized
/// recursively into child `ConfigTree` nodes, so the whole hierarchy reads
/// as one uniform structure.
///
/// The root node may carry a [`SourceResolver`]. A read of a missing string
/// key on the root then transparently attempts to load a source with that
/// name; each identifier is resolved at most once per tree lifetime,
/// whether the attempt hits or misses. Sub-trees never auto-load, but a
/// direct [`load`](Self::load) call is allowed on any node.
///
/// Not safe for concurrent mutation or traversal; callers needing shared
/// access must serialize externally.
#[derive(Clone)]
pub struct ConfigTree {
    entries: Vec<(Key, ConfigValue)>,
    cursor: usize,
    size: usize,
    size_invalid: bool,
    is_root: bool,
    attempted: HashSet<String>,
    resolver: Option<Arc<dyn SourceResolver>>,
}

impl ConfigTree {
    /// Create an empty root tree without a resolver.
    pub fn new() -> Self {
        Self::from_parts(Value::Null, None, true)
    }

    /// Create a root tree from raw bootstrap data.
    ///
    /// Anything that is not a mapping (object or array) yields an empty
    /// tree.
    pub fn from_value(bootstrap: Value) -> Self {
        Self::from_parts(bootstrap, None, true)
    }

    /// Create a root tree from raw bootstrap data with a source resolver
    /// attached.
    ///
    /// The resolver handle is shared with all sub-trees created during
    /// normalization, so direct [`load`](Self::load) calls work on them
    /// too. Only the root runs the automatic lazy-load trigger.
    pub fn with_resolver(bootstrap: Value, resolver: Arc<dyn SourceResolver>) -> Self {
        Self::from_parts(bootstrap, Some(resolver), true)
    }

    fn from_parts(raw: Value, resolver: Option<Arc<dyn SourceResolver>>, is_root: bool) -> Self {
        let entries = Self::normalize_entries(raw, resolver.as_ref());
        let size = entries.len();
        Self {
            entries,
            cursor: 0,
            size,
            size_invalid: false,
            is_root,
            attempted: HashSet::new(),
            resolver,
        }
    }

    /// Recursively wrap nested mappings into child trees. Non-mapping
    /// top-level input yields no entries.
    fn normalize_entries(
        raw: Value,
        resolver: Option<&Arc<dyn SourceResolver>>,
    ) -> Vec<(Key, ConfigValue)> {
        match raw {
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| (Key::Name(key), Self::normalize_value(value, resolver)))
                .collect(),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, value)| {
                    (Key::Index(index as u64), Self::normalize_value(value, resolver))
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn normalize_value(raw: Value, resolver: Option<&Arc<dyn SourceResolver>>) -> ConfigValue {
        if raw.is_object() || raw.is_array() {
            ConfigValue::Tree(Self::from_parts(raw, resolver.cloned(), false))
        } else {
            ConfigValue::Scalar(raw)
        }
    }

    /// Read the value stored under `key`.
    ///
    /// On the root, a missing string key first triggers the lazy-load
    /// protocol. A key that is still missing afterwards returns `None`;
    /// that is never an error.
    pub fn get(&mut self, key: impl Into<Key>) -> Option<&ConfigValue> {
        let key = key.into();
        self.autoload(&key);
        self.entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, value)| value)
    }

    /// Mutable access to the value stored under `key`.
    ///
    /// Runs the same lazy-load trigger as [`get`](Self::get) on the root.
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut ConfigValue> {
        let key = key.into();
        self.autoload(&key);
        self.entries
            .iter_mut()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, value)| value)
    }

    /// Whether an entry exists under `key`.
    ///
    /// Runs the same lazy-load trigger as [`get`](Self::get) on the root.
    pub fn contains(&mut self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.autoload(&key);
        self.entries.iter().any(|(entry_key, _)| *entry_key == key)
    }

    /// Assign `value` to `key`, overwriting an existing entry in place.
    ///
    /// Mapping values are normalized into sub-trees first.
    pub fn set(&mut self, key: impl Into<Key>, value: Value) {
        let key = key.into();
        let value = Self::normalize_value(value, self.resolver.as_ref());
        match self
            .entries
            .iter_mut()
            .find(|(entry_key, _)| *entry_key == key)
        {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
        self.size_invalid = true;
    }

    /// Append `value` under the next free integer key (one past the
    /// largest integer key present, 0 for a tree without integer keys).
    pub fn push(&mut self, value: Value) {
        let next = self
            .entries
            .iter()
            .filter_map(|(key, _)| key.as_index())
            .max()
            .map_or(0, |max| max + 1);
        let value = Self::normalize_value(value, self.resolver.as_ref());
        self.entries.push((Key::Index(next), value));
        self.size_invalid = true;
    }

    /// Remove the entry under `key`, if any. Removing an absent key is not
    /// an error.
    pub fn remove(&mut self, key: impl Into<Key>) {
        let key = key.into();
        if let Some(position) = self
            .entries
            .iter()
            .position(|(entry_key, _)| *entry_key == key)
        {
            self.entries.remove(position);
        }
        self.size_invalid = true;
    }

    /// Number of top-level entries.
    ///
    /// The count is memoized; it is recomputed here, and only here, after
    /// a mutation marked it stale.
    pub fn len(&mut self) -> usize {
        if self.size_invalid {
            self.size = self.entries.len();
            self.size_invalid = false;
        }
        self.size
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Convert the whole tree back to a raw JSON value, the inverse of
    /// normalization.
    ///
    /// A non-empty tree whose keys are exactly `0..n` in order becomes an
    /// array; everything else becomes an object with integer keys rendered
    /// in decimal. An empty tree always flattens to `{}`, even when it was
    /// built from `[]`. Pure: never triggers loading.
    pub fn to_value(&self) -> Value {
        let is_list = !self.entries.is_empty()
            && self
                .entries
                .iter()
                .enumerate()
                .all(|(position, (key, _))| key.as_index() == Some(position as u64));

        if is_list {
            Value::Array(self.entries.iter().map(|(_, value)| value.to_value()).collect())
        } else {
            let mut map = serde_json::Map::new();
            for (key, value) in &self.entries {
                map.insert(key.to_string(), value.to_value());
            }
            Value::Object(map)
        }
    }

    /// Load the source named `identifier` and replace this node's entries
    /// with whatever mapping the resolver leaves behind, normalized.
    ///
    /// Allowed on any node, root or not. The resolver receives the current
    /// entries as a raw mapping and owns the merge policy entirely. A
    /// non-mapping result leaves the entries untouched. The identifier is
    /// recorded as attempted on every outcome, but a direct call never
    /// short-circuits on a previous attempt: a missing source raises
    /// [`ConfigError::SourceNotFound`] each time.
    pub fn load(&mut self, identifier: &str) -> Result<(), ConfigError> {
        let resolver = self.resolver.clone().ok_or(ConfigError::NoResolver)?;

        let result = resolver.load(identifier, self.to_value());
        self.attempted.insert(identifier.to_string());

        let loaded = result?;
        if !loaded.is_object() && !loaded.is_array() {
            debug!(identifier, "source produced non-mapping content, keeping current entries");
            return Ok(());
        }

        self.entries = Self::normalize_entries(loaded, Some(&resolver));
        self.size_invalid = true;
        debug!(identifier, "loaded config source");
        Ok(())
    }

    /// Lazy-load trigger: on a root with a resolver, a missing string key
    /// that has not been attempted before is resolved at most once.
    fn autoload(&mut self, key: &Key) {
        if !self.is_root {
            return;
        }

        let Some(identifier) = key.as_name() else {
            return;
        };

        let Some(resolver) = self.resolver.clone() else {
            return;
        };

        if self.attempted.contains(identifier)
            || self.entries.iter().any(|(entry_key, _)| entry_key == key)
        {
            return;
        }

        if !resolver.exists(identifier) {
            trace!(identifier, "no source for key, memoizing miss");
            self.attempted.insert(identifier.to_string());
            return;
        }

        // A load failure on the automatic path is an ordinary miss, not an
        // error; the attempt was recorded by load().
        if let Err(err) = self.load(identifier) {
            debug!(identifier, error = %err, "lazy load failed");
        }
    }

    /// Reset the traversal cursor to the first entry.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Value at the traversal cursor, `None` once past the last entry.
    ///
    /// A stored scalar `false` or `null` is still `Some`: end of sequence
    /// is signaled by position, not by the value.
    pub fn current(&self) -> Option<&ConfigValue> {
        self.entries.get(self.cursor).map(|(_, value)| value)
    }

    /// Key at the traversal cursor, `None` once past the last entry.
    pub fn key(&self) -> Option<&Key> {
        self.entries.get(self.cursor).map(|(key, _)| key)
    }

    /// Advance the traversal cursor. Moving past the end is legal and
    /// leaves the cursor there until [`rewind`](Self::rewind).
    pub fn next(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
    }

    /// Whether the traversal cursor is on an entry.
    pub fn valid(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Borrowed iteration over entries in insertion order, independent of
    /// the traversal cursor.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ConfigTree {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigTree")
            .field("entries", &self.entries)
            .field("is_root", &self.is_root)
            .finish()
    }
}

impl Serialize for ConfigTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

/// Borrowed iterator over `(&Key, &ConfigValue)` pairs in insertion order.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (Key, ConfigValue)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a ConfigValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a ConfigTree {
    type Item = (&'a Key, &'a ConfigValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
