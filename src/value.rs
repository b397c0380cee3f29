//! Values stored in a configuration tree.

use serde::Serialize;
use serde_json::Value;

use crate::tree::ConfigTree;

/// A single configuration value: either a scalar or a nested tree.
///
/// Structural normalization guarantees that the `Scalar` arm never holds a
/// JSON object or array; anything mapping-shaped becomes a `Tree` before it
/// is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Scalar leaf: string, number, boolean, or null.
    Scalar(Value),
    /// Nested sub-tree, exclusively owned by its parent.
    Tree(ConfigTree),
}

impl ConfigValue {
    /// String content of a scalar value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Scalar(value) => value.as_str(),
            ConfigValue::Tree(_) => None,
        }
    }

    /// Boolean content of a scalar value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Scalar(value) => value.as_bool(),
            ConfigValue::Tree(_) => None,
        }
    }

    /// Integer content of a scalar value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Scalar(value) => value.as_i64(),
            ConfigValue::Tree(_) => None,
        }
    }

    /// Float content of a scalar value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Scalar(value) => value.as_f64(),
            ConfigValue::Tree(_) => None,
        }
    }

    /// The nested tree, if this value is one.
    pub fn as_tree(&self) -> Option<&ConfigTree> {
        match self {
            ConfigValue::Tree(tree) => Some(tree),
            ConfigValue::Scalar(_) => None,
        }
    }

    /// Mutable access to the nested tree, if this value is one.
    pub fn as_tree_mut(&mut self) -> Option<&mut ConfigTree> {
        match self {
            ConfigValue::Tree(tree) => Some(tree),
            ConfigValue::Scalar(_) => None,
        }
    }

    /// Whether this value is the scalar null.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Scalar(Value::Null))
    }

    /// Convert back to a raw JSON value (inverse of normalization).
    pub fn to_value(&self) -> Value {
        match self {
            ConfigValue::Scalar(value) => value.clone(),
            ConfigValue::Tree(tree) => tree.to_value(),
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_value().serialize(serializer)
    }
}
