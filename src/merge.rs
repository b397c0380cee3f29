//! Deep-merge policy for raw configuration mappings.
//!
//! [`FileResolver`] folds the content of a loaded source over a node's
//! current entries with these rules: nested mappings merge key by key,
//! everything else (scalars, nulls, whole arrays) is replaced by the
//! loaded side.
//!
//! [`FileResolver`]: crate::FileResolver

use serde_json::Value;

/// Merge `incoming` over `base`, recursing through nested objects.
///
/// Keys present only in `base` survive; keys present in `incoming` win,
/// including an explicit `null`. Arrays count as atomic values and are
/// replaced wholesale, never concatenated.
pub fn deep_merge(base: Value, incoming: Value) -> Value {
    match (base, incoming) {
        (Value::Object(mut merged), Value::Object(incoming)) => {
            for (key, value) in incoming {
                let value = match merged.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            Value::Object(merged)
        }

        // Anything non-object on either side: the loaded value wins,
        // arrays included.
        (_, incoming) => incoming,
    }
}
