//! conftree - nested configuration container with lazy source loading
//!
//! A [`ConfigTree`] holds an insertion-ordered hierarchy of configuration
//! values: scalars at the leaves, sub-trees of the same kind everywhere a
//! nested mapping appeared in the input. Reads of missing string keys on
//! the root can transparently pull in additional configuration from named
//! external sources through a pluggable [`SourceResolver`]; each source is
//! resolved at most once per tree lifetime.
//!
//! [`FileResolver`] is the bundled resolver: it maps an identifier to a
//! `conf.<identifier>.toml` file on an ordered search path and deep-merges
//! its content over the current entries.

pub mod error;
pub mod file;
pub mod key;
pub mod merge;
pub mod source;
pub mod tree;
pub mod value;

pub use error::ConfigError;
pub use file::FileResolver;
pub use key::Key;
pub use merge::deep_merge;
pub use source::SourceResolver;
pub use tree::ConfigTree;
pub use value::ConfigValue;
