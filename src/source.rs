//! Resolver boundary for named external configuration sources.

use serde_json::Value;

use crate::error::ConfigError;

/// Locates and loads named configuration sources on behalf of a
/// [`ConfigTree`].
///
/// The resolver owns the merge policy: `load` receives the node's current
/// top-level entries as a raw mapping and returns the mapping that should
/// replace them. It may leave the input untouched, overwrite keys, add new
/// ones, or deep-merge into nested sub-mappings.
///
/// Returning a non-mapping value signals unusable source content; the tree
/// treats that as a no-op load and keeps its prior entries.
///
/// [`ConfigTree`]: crate::ConfigTree
pub trait SourceResolver {
    /// Whether a source named `identifier` exists. Must have no side
    /// effects.
    fn exists(&self, identifier: &str) -> bool;

    /// Load the source named `identifier`, merging over `current`.
    ///
    /// Returns [`ConfigError::SourceNotFound`] when no such source exists.
    fn load(&self, identifier: &str, current: Value) -> Result<Value, ConfigError>;
}
