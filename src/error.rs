//! Error types for configuration loading.

/// Errors raised by [`load`] and by source resolvers.
///
/// A resolver returning non-mapping content is not an error: the load is a
/// no-op and prior entries are kept. A read of a missing key is not an error
/// either; [`get`] returns `None`.
///
/// [`load`]: crate::ConfigTree::load
/// [`get`]: crate::ConfigTree::get
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No source with the given identifier exists.
    #[error("config source '{identifier}' not found")]
    SourceNotFound {
        /// Identifier that failed to resolve.
        identifier: String,
    },

    /// The node has no resolver attached, so it cannot load sources.
    #[error("no source resolver attached")]
    NoResolver,

    /// A source file could not be read.
    #[error("IO error reading source '{identifier}': {message}")]
    Io {
        /// Identifier of the source being read.
        identifier: String,
        /// Underlying IO error text.
        message: String,
    },

    /// A source file could not be parsed.
    #[error("parse error in source '{identifier}': {message}")]
    Parse {
        /// Identifier of the source being parsed.
        identifier: String,
        /// Underlying parse error text.
        message: String,
    },
}

impl ConfigError {
    /// Whether this error means the named source does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::SourceNotFound { .. })
    }
}
