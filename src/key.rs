//! Map keys for configuration entries.

use std::fmt;

/// Key of a configuration entry: either a non-negative integer index or a
/// string name.
///
/// Integer keys come from array-shaped input and from [`push`] appends;
/// string keys come from object-shaped input. Only string keys can name an
/// external source.
///
/// [`push`]: crate::ConfigTree::push
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Auto-indexed / array-style key.
    Index(u64),
    /// Named key.
    Name(String),
}

impl Key {
    /// The key name, if this is a string key.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    /// The key index, if this is an integer key.
    pub fn as_index(&self) -> Option<u64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{}", index),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<u64> for Key {
    fn from(index: u64) -> Self {
        Key::Index(index)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index as u64)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}
